//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` once per file and normalizes its JSON into a
//! [`StreamDescriptor`]. A non-zero exit and unparseable output are both
//! reported as probe errors; nothing is retried here.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::adapters::run_tool;
use crate::domain::model::StreamDescriptor;
use crate::error::{SplicerError, SplicerResult};
use crate::ports::ProbePort;
use crate::probe::parse_probe_output;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter using the given executable
    pub fn new(ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe: ffprobe.into(),
        }
    }

    fn probe_args(path: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = [
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ]
        .into_iter()
        .map(std::ffi::OsString::from)
        .collect();
        args.push(path.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe(&self, path: &Path) -> SplicerResult<StreamDescriptor> {
        info!("Probing media file: {}", path.display());

        if !path.exists() {
            return Err(SplicerError::probe(
                path.display().to_string(),
                "file does not exist",
            ));
        }

        let output = run_tool(&self.ffprobe, Self::probe_args(path))
            .await
            .map_err(|e| match e {
                SplicerError::ExecutionError { status, stderr, .. } => SplicerError::probe(
                    path.display().to_string(),
                    format!("ffprobe exited with {}: {}", status, stderr),
                ),
                other => other,
            })?;

        let json = String::from_utf8_lossy(&output.stdout);
        let descriptor = parse_probe_output(path, &json)?;

        debug!(
            "Probed {}: format={}, duration={:.3}s, video={:?}, audio={:?}",
            path.display(),
            descriptor.container_format,
            descriptor.duration_seconds,
            descriptor.video,
            descriptor.audio
        );
        Ok(descriptor)
    }
}
