// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::model::*;
use crate::error::SplicerResult;
use crate::planner::overlay::OverlayStyle;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file and return its normalized descriptor
    async fn probe(&self, path: &Path) -> SplicerResult<StreamDescriptor>;
}

/// Port for media encoding and concatenation
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Execute a concat plan, writing the joined file to `output`
    async fn execute_concat(&self, plan: &ConcatPlan, output: &Path) -> SplicerResult<()>;

    /// Cut one time range out of a source and render it onto the canvas
    async fn render_segment(&self, job: &SegmentJob) -> SplicerResult<()>;
}

/// Port for fetching remote sources
#[async_trait]
pub trait DownloadPort: Send + Sync {
    /// Download `url` into `dest_dir`, reusing a cached copy when present
    async fn fetch(&self, url: &str, dest_dir: &Path) -> SplicerResult<PathBuf>;
}

/// Everything the encoder needs to produce one vertical part
#[derive(Debug, Clone)]
pub struct SegmentJob {
    pub source: PathBuf,
    pub output: PathBuf,
    pub range: TimeRange,
    pub canvas: Canvas,
    pub geometry: Geometry,
    pub placement: TextPlacement,
    pub style: OverlayStyle,
    pub settings: EncodeSettings,
}
