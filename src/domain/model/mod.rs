// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Video stream summary taken from the first video stream of a file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoStream {
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub pixel_format: Option<String>,
    pub fps: f64,
}

impl VideoStream {
    /// Get aspect ratio
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Format as `WIDTHxHEIGHT`
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Audio stream summary taken from the first audio stream of a file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioStream {
    pub codec: String,
    pub sample_rate: u32,
    pub channels: u32,
}

/// Normalized description of one probed media file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamDescriptor {
    pub path: PathBuf,
    pub container_format: String,
    pub duration_seconds: f64,
    pub video: Option<VideoStream>,
    pub audio: Option<AudioStream>,
}

impl StreamDescriptor {
    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

/// Outcome of a lossless-concatenation compatibility check.
///
/// The verdict is compatible exactly when no mismatch reasons were recorded;
/// the two can't disagree because `compatible` is derived from `reasons`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityVerdict {
    compatible: bool,
    reasons: Vec<String>,
}

impl CompatibilityVerdict {
    /// Build a verdict from the accumulated mismatch reasons
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            compatible: reasons.is_empty(),
            reasons,
        }
    }

    pub fn is_compatible(&self) -> bool {
        self.compatible
    }

    /// Mismatch descriptions, in the order they were detected
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }
}

/// Encode parameters used when inputs have to be re-encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeSettings {
    pub video_codec: String,
    pub crf: u8,
    pub preset: String,
    pub pixel_format: String,
    pub audio_codec: String,
    pub audio_bitrate_kbps: u32,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            crf: 20,
            preset: "veryfast".to_string(),
            pixel_format: "yuv420p".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate_kbps: 128,
        }
    }
}

impl EncodeSettings {
    /// Audio bitrate in the `128k` form ffmpeg expects
    pub fn audio_bitrate_arg(&self) -> String {
        format!("{}k", self.audio_bitrate_kbps)
    }
}

/// Execution plan for joining several inputs into one file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ConcatPlan {
    /// Container-level concatenation with stream copy
    DirectCopy { inputs: Vec<PathBuf> },
    /// Re-encode every input with common settings, then concatenate
    TranscodeThenConcat {
        inputs: Vec<PathBuf>,
        settings: EncodeSettings,
    },
}

impl ConcatPlan {
    pub fn inputs(&self) -> &[PathBuf] {
        match self {
            ConcatPlan::DirectCopy { inputs } => inputs,
            ConcatPlan::TranscodeThenConcat { inputs, .. } => inputs,
        }
    }

    pub fn is_direct_copy(&self) -> bool {
        matches!(self, ConcatPlan::DirectCopy { .. })
    }

    /// Short method name used in logs and reports
    pub fn method_name(&self) -> &'static str {
        match self {
            ConcatPlan::DirectCopy { .. } => "concat",
            ConcatPlan::TranscodeThenConcat { .. } => "reencode",
        }
    }
}

/// Time window inside a source file, in seconds with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeRange {
    pub start_seconds: f64,
    pub duration_seconds: f64,
}

impl TimeRange {
    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start={:.3}s duration={:.3}s",
            self.start_seconds, self.duration_seconds
        )
    }
}

/// Target frame size for reformatted output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// 9:16 full-HD canvas
    pub const VERTICAL_HD: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    /// Parse a `WIDTHxHEIGHT` string
    pub fn parse(value: &str) -> Option<Self> {
        let (w, h) = value.trim().split_once(|c: char| c == 'x' || c == 'X')?;
        let width = w.trim().parse::<u32>().ok()?;
        let height = h.trim().parse::<u32>().ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::VERTICAL_HD
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Scale-to-fit result of a source frame inside a canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub scale: f64,
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

/// A single positioned text element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSlot {
    pub text: String,
    pub font_size: u32,
    pub y: u32,
}

/// Title and subtitle positions relative to the visible video area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextPlacement {
    pub margin_px: u32,
    pub title: Option<TextSlot>,
    pub subtitle: Option<TextSlot>,
}

impl TextPlacement {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.subtitle.is_none()
    }
}
