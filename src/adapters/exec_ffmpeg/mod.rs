//! FFmpeg execution adapter
//!
//! Runs the `ffmpeg` executable for concat plans and segment renders.
//! Intermediate files live in temporary locations that are removed when
//! the operation finishes, whether it succeeded or not.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::adapters::run_tool;
use crate::domain::model::{ConcatPlan, EncodeSettings};
use crate::error::SplicerResult;
use crate::planner::overlay::vertical_filter;
use crate::ports::{ExecutePort, SegmentJob};
use crate::utils::path::PathUtils;

pub mod args;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    ffmpeg: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter using the given executable
    pub fn new(ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
        }
    }

    async fn concat_direct(&self, inputs: &[PathBuf], output: &Path) -> SplicerResult<()> {
        let absolute = inputs
            .iter()
            .map(|p| PathUtils::absolutize(p))
            .collect::<SplicerResult<Vec<_>>>()?;

        let mut list = tempfile::Builder::new()
            .prefix("splicer_concat_")
            .suffix(".txt")
            .tempfile()?;
        list.write_all(args::concat_list(&absolute).as_bytes())?;
        list.flush()?;
        debug!("Concat list written to {}", list.path().display());

        run_tool(&self.ffmpeg, args::direct_concat_args(list.path(), output)).await?;
        Ok(())
    }

    async fn concat_transcoded(
        &self,
        inputs: &[PathBuf],
        settings: &EncodeSettings,
        output: &Path,
    ) -> SplicerResult<()> {
        let work_dir = tempfile::Builder::new().prefix("splicer_ts_").tempdir()?;

        let mut parts = Vec::with_capacity(inputs.len());
        for (i, input) in inputs.iter().enumerate() {
            let ts = work_dir.path().join(format!("{}.ts", i + 1));
            info!(
                "Re-encoding input {}/{}: {}",
                i + 1,
                inputs.len(),
                input.display()
            );
            run_tool(&self.ffmpeg, args::transcode_to_ts_args(input, settings, &ts)).await?;
            parts.push(ts);
        }

        run_tool(&self.ffmpeg, args::ts_concat_args(&parts, output)).await?;
        Ok(())
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn execute_concat(&self, plan: &ConcatPlan, output: &Path) -> SplicerResult<()> {
        info!(
            "Executing {} plan for {} inputs -> {}",
            plan.method_name(),
            plan.inputs().len(),
            output.display()
        );

        match plan {
            ConcatPlan::DirectCopy { inputs } => self.concat_direct(inputs, output).await,
            ConcatPlan::TranscodeThenConcat { inputs, settings } => {
                self.concat_transcoded(inputs, settings, output).await
            }
        }
    }

    async fn render_segment(&self, job: &SegmentJob) -> SplicerResult<()> {
        let filter = vertical_filter(&job.geometry, job.canvas, &job.placement, &job.style);
        debug!("Segment filter chain: {}", filter);
        info!("Rendering {} ({})", job.output.display(), job.range);

        run_tool(&self.ffmpeg, args::segment_args(job, &filter)).await?;
        Ok(())
    }
}
