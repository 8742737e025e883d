// Analyze interactor - Compatibility report without executing anything

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::model::*;
use crate::domain::rules::CompatibilityAnalyzer;
use crate::error::SplicerResult;
use crate::planner::ConcatPlanner;
use crate::ports::ProbePort;

/// What merging the analyzed files would do
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// `concat` or `reencode`
    pub method: &'static str,
    pub notes: Vec<String>,
    /// Target settings when re-encoding is recommended
    pub target: Option<EncodeSettings>,
}

/// Per-file descriptors, verdict and recommendation
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeReport {
    pub files: Vec<StreamDescriptor>,
    pub verdict: CompatibilityVerdict,
    pub recommendation: Recommendation,
}

/// Interactor for the analyze use case
pub struct AnalyzeInteractor {
    probe_port: Arc<dyn ProbePort>,
    planner: ConcatPlanner,
}

impl AnalyzeInteractor {
    /// Create new analyze interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>, planner: ConcatPlanner) -> Self {
        Self {
            probe_port,
            planner,
        }
    }

    /// Probe every file and report whether they can be joined losslessly
    pub async fn execute(&self, paths: &[PathBuf]) -> SplicerResult<AnalyzeReport> {
        info!("Analyzing {} files", paths.len());

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(self.probe_port.probe(path).await?);
        }

        let verdict = CompatibilityAnalyzer::analyze(&files)?;
        let recommendation = self.recommend(paths, &verdict);

        Ok(AnalyzeReport {
            files,
            verdict,
            recommendation,
        })
    }

    fn recommend(&self, paths: &[PathBuf], verdict: &CompatibilityVerdict) -> Recommendation {
        match self.planner.plan(paths, verdict, false) {
            ConcatPlan::DirectCopy { .. } => Recommendation {
                method: "concat",
                notes: vec!["Files are compatible, use the concat demuxer without re-encoding".to_string()],
                target: None,
            },
            ConcatPlan::TranscodeThenConcat { settings, .. } => Recommendation {
                method: "reencode",
                notes: vec![
                    format!(
                        "Re-encode to {} video and {} audio before joining",
                        settings.video_codec, settings.audio_codec
                    ),
                    format!("Reasons: {}", verdict.reasons().join("; ")),
                ],
                target: Some(settings),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::mocks::*;
    use crate::error::SplicerError;

    #[tokio::test]
    async fn test_compatible_files_recommend_concat() {
        let probe = MockProbe::default()
            .with(video_descriptor("a.mp4", "h264", 1280, 720))
            .with(video_descriptor("b.mp4", "h264", 1280, 720));
        let interactor = AnalyzeInteractor::new(Arc::new(probe), ConcatPlanner::new());

        let report = interactor
            .execute(&[PathBuf::from("a.mp4"), PathBuf::from("b.mp4")])
            .await
            .unwrap();

        assert!(report.verdict.is_compatible());
        assert_eq!(report.recommendation.method, "concat");
        assert!(report.recommendation.target.is_none());
        assert_eq!(report.files.len(), 2);
    }

    #[tokio::test]
    async fn test_mismatch_recommends_reencode_with_reasons() {
        let probe = MockProbe::default()
            .with(video_descriptor("a.mp4", "h264", 1280, 720))
            .with(video_descriptor("b.mp4", "h264", 1920, 1080));
        let interactor = AnalyzeInteractor::new(Arc::new(probe), ConcatPlanner::new());

        let report = interactor
            .execute(&[PathBuf::from("a.mp4"), PathBuf::from("b.mp4")])
            .await
            .unwrap();

        assert_eq!(report.recommendation.method, "reencode");
        assert_eq!(
            report.recommendation.target.as_ref().unwrap().video_codec,
            "libx264"
        );
        assert!(report.recommendation.notes[1].contains("Resolution differs"));
    }

    #[tokio::test]
    async fn test_single_file_is_invalid() {
        let probe = MockProbe::default().with(video_descriptor("a.mp4", "h264", 1280, 720));
        let interactor = AnalyzeInteractor::new(Arc::new(probe), ConcatPlanner::new());

        let err = interactor
            .execute(&[PathBuf::from("a.mp4")])
            .await
            .unwrap_err();
        assert!(matches!(err, SplicerError::InvalidArgument { .. }));
    }
}
