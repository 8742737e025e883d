// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::model::{Canvas, EncodeSettings};
use crate::error::{SplicerError, SplicerResult};
use crate::planner::overlay::OverlayStyle;
use crate::utils::logging::{LogLevel, LoggingConfig};

/// Locations searched when no config file is given explicitly
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["splicer.toml", "config/splicer.toml"];

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tools: ToolPaths,
    pub paths: PathsConfig,
    pub merge: MergeConfig,
    pub split: SplitConfig,
    pub download: DownloadConfig,
    pub logging: LoggingConfig,
}

/// External tool locations, handed to the adapters explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub ytdlp: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            ytdlp: PathBuf::from("yt-dlp"),
        }
    }
}

/// Working directory layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub work_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
        }
    }
}

impl PathsConfig {
    /// Where downloaded sources are cached
    pub fn raw_dir(&self) -> PathBuf {
        self.work_dir.join("raw_videos")
    }

    /// Where finished files are written by default
    pub fn output_dir(&self) -> PathBuf {
        self.work_dir.join("output_videos")
    }
}

/// Re-encode settings for the merge workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub crf: u8,
    pub preset: String,
    pub audio_bitrate_kbps: u32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        let defaults = EncodeSettings::default();
        Self {
            crf: defaults.crf,
            preset: defaults.preset,
            audio_bitrate_kbps: defaults.audio_bitrate_kbps,
        }
    }
}

impl MergeConfig {
    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings {
            crf: self.crf,
            preset: self.preset.clone(),
            audio_bitrate_kbps: self.audio_bitrate_kbps,
            ..EncodeSettings::default()
        }
    }
}

/// Settings for the split workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub parts: u32,
    /// Target canvas as `WIDTHxHEIGHT`
    pub canvas: String,
    pub crf: u8,
    pub preset: String,
    pub audio_bitrate_kbps: u32,
    pub overlay: OverlayStyle,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            parts: 3,
            canvas: Canvas::VERTICAL_HD.to_string(),
            crf: 18,
            preset: "fast".to_string(),
            audio_bitrate_kbps: 128,
            overlay: OverlayStyle::default(),
        }
    }
}

impl SplitConfig {
    pub fn canvas(&self) -> SplicerResult<Canvas> {
        Canvas::parse(&self.canvas).ok_or_else(|| SplicerError::ConfigError {
            message: format!("split.canvas must look like 1080x1920, got '{}'", self.canvas),
        })
    }

    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings {
            crf: self.crf,
            preset: self.preset.clone(),
            audio_bitrate_kbps: self.audio_bitrate_kbps,
            ..EncodeSettings::default()
        }
    }
}

/// Download tool options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Netscape-format cookies file for private posts
    pub cookies: Option<PathBuf>,
    /// yt-dlp format selector
    pub format: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            cookies: None,
            format: "bestvideo[ext=mp4]+bestaudio[ext=m4a]/bestvideo+bestaudio/best".to_string(),
        }
    }
}

impl AppConfig {
    /// Check value ranges that serde can't express
    pub fn validate(&self) -> SplicerResult<()> {
        for (section, crf) in [("merge", self.merge.crf), ("split", self.split.crf)] {
            if crf > 51 {
                return Err(SplicerError::ConfigError {
                    message: format!("{}.crf cannot exceed 51, got {}", section, crf),
                });
            }
        }
        if self.split.parts < 1 {
            return Err(SplicerError::ConfigError {
                message: "split.parts must be >= 1".to_string(),
            });
        }
        self.split.canvas()?;
        Ok(())
    }

    /// Apply `SPLICER_*` overrides obtained through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> SplicerResult<usize>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;
        if let Some(v) = lookup("SPLICER_FFMPEG") {
            self.tools.ffmpeg = PathBuf::from(v);
            applied += 1;
        }
        if let Some(v) = lookup("SPLICER_FFPROBE") {
            self.tools.ffprobe = PathBuf::from(v);
            applied += 1;
        }
        if let Some(v) = lookup("SPLICER_YTDLP") {
            self.tools.ytdlp = PathBuf::from(v);
            applied += 1;
        }
        if let Some(v) = lookup("SPLICER_WORK_DIR") {
            self.paths.work_dir = PathBuf::from(v);
            applied += 1;
        }
        if let Some(v) = lookup("SPLICER_COOKIES") {
            self.download.cookies = Some(PathBuf::from(v));
            applied += 1;
        }
        if let Some(v) = lookup("SPLICER_LOG_LEVEL") {
            self.logging.level = LogLevel::parse(&v).ok_or_else(|| SplicerError::ConfigError {
                message: format!("SPLICER_LOG_LEVEL has unknown level '{}'", v),
            })?;
            applied += 1;
        }
        Ok(applied)
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> SplicerResult<AppConfig> {
        toml::from_str(content).map_err(|e| SplicerError::ConfigError {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Load a config file.
    ///
    /// An explicit path must exist. Without one the default locations are
    /// tried in order, falling back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> SplicerResult<AppConfig> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(SplicerError::ConfigError {
                        message: format!("Config file does not exist: {}", path.display()),
                    });
                }
                Some(path.to_path_buf())
            }
            None => DEFAULT_CONFIG_PATHS
                .iter()
                .map(PathBuf::from)
                .find(|p| p.exists()),
        };

        let Some(path) = path else {
            info!("No config file found, using defaults");
            return Ok(AppConfig::default());
        };

        info!("Loading configuration from: {}", path.display());
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }
}
