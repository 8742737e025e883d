//! Splicer CLI Library
//!
//! Decides how video clips can be joined (stream copy or re-encode), splits
//! long videos into even parts and lays them out on a vertical canvas. The
//! media work itself is delegated to `ffprobe`, `ffmpeg` and `yt-dlp`.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod planner;
pub mod ports;
pub mod probe;
pub mod utils;

// Re-export commonly used types
pub use domain::model::{
    Canvas, CompatibilityVerdict, ConcatPlan, EncodeSettings, Geometry, StreamDescriptor,
    TextPlacement, TimeRange,
};
pub use domain::rules::CompatibilityAnalyzer;
pub use error::{SplicerError, SplicerResult};
pub use planner::{ConcatPlanner, GeometryPlanner, SegmentPlanner};
