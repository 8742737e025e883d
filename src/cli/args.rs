//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input files or URLs, in output order
    #[arg(required = true, num_args = 2..)]
    pub inputs: Vec<String>,

    /// Output file path (default: output_videos/merged_<timestamp>.mp4)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Re-encode even when the inputs are compatible
    #[arg(long)]
    pub force_reencode: bool,

    /// Constant Rate Factor for re-encoding (0-51)
    #[arg(long)]
    pub crf: Option<u8>,

    /// x264 preset for re-encoding
    #[arg(long)]
    pub preset: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Source video file or URL
    #[arg(short, long)]
    pub source: String,

    /// Number of parts (default from config)
    #[arg(short, long)]
    pub parts: Option<u32>,

    /// Title drawn above the video
    #[arg(long)]
    pub title: Option<String>,

    /// Subtitle drawn below the video
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Output directory for part_<n>.mp4 files
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Target canvas as WIDTHxHEIGHT (default from config)
    #[arg(long)]
    pub canvas: Option<String>,

    /// Font family for the overlay text
    #[arg(long)]
    pub font: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Files to compare; the first one is the reference
    #[arg(required = true, num_args = 2..)]
    pub files: Vec<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan-segments command
#[derive(Args, Debug)]
pub struct PlanSegmentsArgs {
    /// Total duration in seconds
    #[arg(short, long, allow_negative_numbers = true)]
    pub duration: f64,

    /// Number of parts
    #[arg(short, long, default_value = "3")]
    pub parts: u32,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan-layout command
#[derive(Args, Debug)]
pub struct PlanLayoutArgs {
    /// Source width in pixels
    #[arg(long)]
    pub width: u32,

    /// Source height in pixels
    #[arg(long)]
    pub height: u32,

    /// Target canvas as WIDTHxHEIGHT
    #[arg(long, default_value = "1080x1920")]
    pub canvas: String,

    /// Title text
    #[arg(long)]
    pub title: Option<String>,

    /// Subtitle text
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Also print the ffmpeg filter chain
    #[arg(long)]
    pub filter: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
