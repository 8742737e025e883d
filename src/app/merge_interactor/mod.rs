// Merge interactor - Orchestrates the merge use case

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::app::resolve_source;
use crate::domain::model::*;
use crate::domain::rules::CompatibilityAnalyzer;
use crate::error::{SplicerError, SplicerResult};
use crate::planner::ConcatPlanner;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Merge request: sources are local paths or URLs, in output order
#[derive(Debug, Clone, Default)]
pub struct MergeRequest {
    pub sources: Vec<String>,
    /// Defaults to `<output_dir>/merged_<unix-ts>.mp4`
    pub output: Option<PathBuf>,
    pub force_reencode: bool,
}

/// Outcome of a merge
#[derive(Debug, Clone, Serialize)]
pub struct MergeResponse {
    pub output: PathBuf,
    pub verdict: CompatibilityVerdict,
    /// Plan that produced the output
    pub plan: ConcatPlan,
    /// Whether a failed direct copy was retried with re-encoding
    pub fell_back: bool,
}

/// Interactor for the merge use case
pub struct MergeInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    download_port: Arc<dyn DownloadPort>,
    planner: ConcatPlanner,
    raw_dir: PathBuf,
    output_dir: PathBuf,
}

impl MergeInteractor {
    /// Create new merge interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        download_port: Arc<dyn DownloadPort>,
        planner: ConcatPlanner,
        raw_dir: PathBuf,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            download_port,
            planner,
            raw_dir,
            output_dir,
        }
    }

    /// Execute the merge
    pub async fn execute(&self, request: MergeRequest) -> SplicerResult<MergeResponse> {
        if request.sources.len() < 2 {
            return Err(SplicerError::invalid(format!(
                "merge needs at least two inputs, got {}",
                request.sources.len()
            )));
        }

        info!("Starting merge of {} sources", request.sources.len());

        let mut inputs = Vec::with_capacity(request.sources.len());
        for source in &request.sources {
            inputs.push(resolve_source(self.download_port.as_ref(), source, &self.raw_dir).await?);
        }

        let mut descriptors = Vec::with_capacity(inputs.len());
        for input in &inputs {
            descriptors.push(self.probe_port.probe(input).await?);
        }

        let verdict = CompatibilityAnalyzer::analyze(&descriptors)?;
        for reason in verdict.reasons() {
            info!("Incompatibility: {}", reason);
        }

        let output = match request.output {
            Some(output) => output,
            None => PathUtils::merged_output_path(&self.output_dir, chrono::Utc::now().timestamp()),
        };
        PathUtils::ensure_parent(&output)?;

        let plan = self
            .planner
            .plan(&inputs, &verdict, request.force_reencode);

        let (plan, fell_back) = match self.execute_port.execute_concat(&plan, &output).await {
            Ok(()) => (plan, false),
            Err(e) if plan.is_direct_copy() => {
                warn!("Direct concat failed ({}), retrying with re-encode", e);
                let fallback = self.planner.plan(&inputs, &verdict, true);
                self.execute_port.execute_concat(&fallback, &output).await?;
                (fallback, true)
            }
            Err(e) => return Err(e),
        };

        info!(
            "Merge completed using {}: {}",
            plan.method_name(),
            output.display()
        );

        Ok(MergeResponse {
            output,
            verdict,
            plan,
            fell_back,
        })
    }
}
