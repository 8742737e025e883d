//! CLI module for Splicer
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::*;

/// Splicer: merge clips and cut long videos into vertical shorts
///
/// Probes inputs with ffprobe, joins compatible files losslessly and
/// re-encodes the rest with ffmpeg, and downloads tweet/X or YouTube
/// sources with yt-dlp.
#[derive(Parser, Debug)]
#[command(name = "splicer")]
#[command(about = "Splicer - merge clips and split long videos into vertical parts")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "SPLICER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Working directory holding raw_videos/ and output_videos/
    #[arg(long, global = true)]
    pub work_dir: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge two or more clips into one file
    Merge(MergeArgs),
    /// Split a long video into vertical parts with optional text
    Split(SplitArgs),
    /// Report whether files can be joined without re-encoding
    Analyze(AnalyzeArgs),
    /// Print the time ranges a split would produce
    PlanSegments(PlanSegmentsArgs),
    /// Print the canvas layout for a source resolution
    PlanLayout(PlanLayoutArgs),
    /// Check that the external tools can be started
    Check,
}
