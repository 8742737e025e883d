// Split interactor - Orchestrates the split use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::app::resolve_source;
use crate::domain::model::*;
use crate::error::{SplicerError, SplicerResult};
use crate::planner::overlay::OverlayStyle;
use crate::planner::{GeometryPlanner, SegmentPlanner};
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Split request
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// Local path or URL of the long-form video
    pub source: String,
    pub parts: u32,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// Defaults to the configured output directory
    pub out_dir: Option<PathBuf>,
    pub canvas: Canvas,
}

/// Outcome of a split
#[derive(Debug, Clone, Serialize)]
pub struct SplitResponse {
    pub source: PathBuf,
    pub duration_seconds: f64,
    pub geometry: Geometry,
    pub placement: TextPlacement,
    pub ranges: Vec<TimeRange>,
    /// Rendered files, in segment order
    pub parts: Vec<PathBuf>,
}

/// Interactor for the split use case
pub struct SplitInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    download_port: Arc<dyn DownloadPort>,
    settings: EncodeSettings,
    style: OverlayStyle,
    raw_dir: PathBuf,
    output_dir: PathBuf,
}

impl SplitInteractor {
    /// Create new split interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        download_port: Arc<dyn DownloadPort>,
        settings: EncodeSettings,
        style: OverlayStyle,
        raw_dir: PathBuf,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            download_port,
            settings,
            style,
            raw_dir,
            output_dir,
        }
    }

    /// Execute the split
    pub async fn execute(&self, request: SplitRequest) -> SplicerResult<SplitResponse> {
        if request.parts < 1 {
            return Err(SplicerError::invalid("parts must be >= 1"));
        }

        let source =
            resolve_source(self.download_port.as_ref(), &request.source, &self.raw_dir).await?;
        let descriptor = self.probe_port.probe(&source).await?;

        let video = descriptor.video.as_ref().ok_or_else(|| {
            SplicerError::invalid(format!("{} has no video stream", source.display()))
        })?;
        info!(
            "Source {}: {} {:.3}s",
            source.display(),
            video.resolution(),
            descriptor.duration_seconds
        );

        let ranges = SegmentPlanner::split(descriptor.duration_seconds, request.parts)?;
        let geometry = GeometryPlanner::fit_center(video.width, video.height, request.canvas)?;
        let placement = GeometryPlanner::place_text(
            &geometry,
            request.canvas,
            request.title.as_deref(),
            request.subtitle.as_deref(),
        );

        let out_dir = request
            .out_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.clone());
        let jobs = self.plan_jobs(&source, &out_dir, &ranges, request.canvas, geometry, &placement);

        PathUtils::ensure_dir(&out_dir)?;

        let mut parts = Vec::with_capacity(jobs.len());
        for (i, job) in jobs.iter().enumerate() {
            info!("Rendering part {}/{}", i + 1, jobs.len());
            self.execute_port.render_segment(job).await?;
            parts.push(job.output.clone());
        }

        info!("Split completed: {} parts in {}", parts.len(), out_dir.display());

        Ok(SplitResponse {
            source,
            duration_seconds: descriptor.duration_seconds,
            geometry,
            placement,
            ranges,
            parts,
        })
    }

    /// One render job per range, parts numbered from 1
    fn plan_jobs(
        &self,
        source: &Path,
        out_dir: &Path,
        ranges: &[TimeRange],
        canvas: Canvas,
        geometry: Geometry,
        placement: &TextPlacement,
    ) -> Vec<SegmentJob> {
        ranges
            .iter()
            .enumerate()
            .map(|(i, range)| SegmentJob {
                source: source.to_path_buf(),
                output: PathUtils::part_output_path(out_dir, i + 1),
                range: *range,
                canvas,
                geometry,
                placement: placement.clone(),
                style: self.style.clone(),
                settings: self.settings.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::mocks::*;

    fn interactor(
        probe: MockProbe,
        executor: Arc<MockExecutor>,
        dir: &tempfile::TempDir,
    ) -> SplitInteractor {
        SplitInteractor::new(
            Arc::new(probe),
            executor,
            Arc::new(MockDownloader::default()),
            EncodeSettings {
                crf: 18,
                preset: "fast".to_string(),
                ..EncodeSettings::default()
            },
            OverlayStyle::default(),
            dir.path().join("raw_videos"),
            dir.path().join("output_videos"),
        )
    }

    fn source_file(dir: &tempfile::TempDir, duration: f64) -> (String, MockProbe) {
        let path = dir.path().join("long.mp4");
        std::fs::write(&path, b"").unwrap();
        let name = path.display().to_string();
        let mut descriptor = video_descriptor(&name, "h264", 1920, 1080);
        descriptor.duration_seconds = duration;
        (name, MockProbe::default().with(descriptor))
    }

    fn request(source: String, parts: u32) -> SplitRequest {
        SplitRequest {
            source,
            parts,
            title: Some("Episode 1".to_string()),
            subtitle: None,
            out_dir: None,
            canvas: Canvas::VERTICAL_HD,
        }
    }

    #[tokio::test]
    async fn test_split_renders_every_part_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let (source, probe) = source_file(&dir, 100.0);
        let executor = Arc::new(MockExecutor::default());
        let interactor = interactor(probe, Arc::clone(&executor), &dir);

        let response = interactor.execute(request(source, 3)).await.unwrap();

        assert_eq!(response.parts.len(), 3);
        assert_eq!(response.ranges[2].start_seconds, 66.666);
        assert_eq!(response.geometry.scaled_height, 607);
        assert_eq!(response.placement.title.as_ref().unwrap().y, 608);
        assert!(response.placement.subtitle.is_none());

        let jobs = executor.segment_calls.lock().unwrap();
        assert_eq!(jobs.len(), 3);
        for (i, job) in jobs.iter().enumerate() {
            assert_eq!(job.output, dir.path().join(format!("output_videos/part_{}.mp4", i + 1)));
            assert_eq!(job.settings.crf, 18);
            assert_eq!(job.range, response.ranges[i]);
        }
        assert!(dir.path().join("output_videos").is_dir());
    }

    #[tokio::test]
    async fn test_split_uses_requested_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (source, probe) = source_file(&dir, 30.0);
        let executor = Arc::new(MockExecutor::default());
        let interactor = interactor(probe, Arc::clone(&executor), &dir);

        let mut req = request(source, 2);
        req.out_dir = Some(dir.path().join("shorts"));
        let response = interactor.execute(req).await.unwrap();

        assert_eq!(response.parts[1], dir.path().join("shorts/part_2.mp4"));
    }

    #[tokio::test]
    async fn test_render_failure_stops_the_split() {
        let dir = tempfile::tempdir().unwrap();
        let (source, probe) = source_file(&dir, 100.0);
        let executor = Arc::new(MockExecutor {
            fail_segment: Some(2),
            ..Default::default()
        });
        let interactor = interactor(probe, Arc::clone(&executor), &dir);

        let err = interactor.execute(request(source, 4)).await.unwrap_err();
        assert!(matches!(err, SplicerError::ExecutionError { .. }));
        assert_eq!(executor.segment_calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_source_without_video_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio.m4a");
        std::fs::write(&path, b"").unwrap();
        let name = path.display().to_string();
        let mut descriptor = video_descriptor(&name, "h264", 1, 1);
        descriptor.video = None;

        let executor = Arc::new(MockExecutor::default());
        let interactor = interactor(MockProbe::default().with(descriptor), executor, &dir);

        let err = interactor.execute(request(name, 3)).await.unwrap_err();
        assert!(matches!(err, SplicerError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_too_short_source_renders_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (source, probe) = source_file(&dir, 0.002);
        let executor = Arc::new(MockExecutor::default());
        let interactor = interactor(probe, Arc::clone(&executor), &dir);

        let err = interactor.execute(request(source, 3)).await.unwrap_err();
        assert!(matches!(err, SplicerError::InvalidArgument { .. }));
        assert!(executor.segment_calls.lock().unwrap().is_empty());
    }
}
