//! Path helpers for sources and output files

use std::path::{Path, PathBuf};

use crate::error::SplicerResult;

/// Path helpers shared by the workflows
pub struct PathUtils;

impl PathUtils {
    /// Whether a source argument names a remote URL rather than a local file
    pub fn is_url(source: &str) -> bool {
        let lower = source.trim_start().to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }

    /// Resolve a path against the current directory without touching the
    /// filesystem beyond `current_dir`
    pub fn absolutize(path: &Path) -> SplicerResult<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(std::env::current_dir()?.join(path))
        }
    }

    /// Default merge output, `merged_<unix-seconds>.mp4`
    pub fn merged_output_path(output_dir: &Path, unix_seconds: i64) -> PathBuf {
        output_dir.join(format!("merged_{}.mp4", unix_seconds))
    }

    /// Output path of the 1-based part `n`
    pub fn part_output_path(out_dir: &Path, n: usize) -> PathBuf {
        out_dir.join(format!("part_{}.mp4", n))
    }

    /// Create `dir` and its parents if missing
    pub fn ensure_dir(dir: &Path) -> SplicerResult<()> {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Create the parent directory of an output file if missing
    pub fn ensure_parent(file: &Path) -> SplicerResult<()> {
        match file.parent() {
            Some(parent) => Self::ensure_dir(parent),
            None => Ok(()),
        }
    }
}
