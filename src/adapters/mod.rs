// Adapters - External system implementations

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::error::{SplicerError, SplicerResult};

pub mod download_ytdlp;
pub mod exec_ffmpeg;
pub mod probe_ffprobe;
pub mod toml_config;

// Re-export adapters
pub use download_ytdlp::YtDlpAdapter;
pub use exec_ffmpeg::FFmpegAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use toml_config::{AppConfig, TomlConfigAdapter};

/// Lines of stderr kept in an `ExecutionError`
const STDERR_TAIL_LINES: usize = 20;

/// Run an external tool to completion, failing on a non-zero exit
pub(crate) async fn run_tool<I, S>(program: &Path, args: I) -> SplicerResult<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = tool_name(program);
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!("Running {:?}", command.as_std());

    let output = command
        .output()
        .await
        .map_err(|e| SplicerError::ToolNotFound {
            tool: tool.clone(),
            message: format!("{} ({})", e, program.display()),
        })?;

    if !output.status.success() {
        return Err(SplicerError::ExecutionError {
            tool,
            status: output.status.to_string(),
            stderr: stderr_tail(&output.stderr),
        });
    }

    Ok(output)
}

/// First line of a tool's version banner, e.g. `ffmpeg version 6.1.1`
pub async fn tool_version(program: &Path, flag: &str) -> SplicerResult<String> {
    let output = run_tool(program, [flag]).await?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
}

fn tool_name(program: &Path) -> String {
    program
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| program.display().to_string())
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_name_from_path() {
        assert_eq!(tool_name(Path::new("/usr/bin/ffmpeg")), "ffmpeg");
        assert_eq!(tool_name(Path::new("ffprobe")), "ffprobe");
        assert!(tool_name(Path::new(r"C:\ffmpeg\bin\ffmpeg.exe")).contains("ffmpeg"));
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr: String = (1..=30).map(|i| format!("line {}\n", i)).collect();
        let tail = stderr_tail(stderr.as_bytes());
        assert!(tail.starts_with("line 11"));
        assert!(tail.ends_with("line 30"));
    }

    #[tokio::test]
    async fn test_missing_tool_is_tool_not_found() {
        let err = run_tool(Path::new("/nonexistent/splicer-tool"), ["-version"])
            .await
            .unwrap_err();
        assert!(matches!(err, SplicerError::ToolNotFound { .. }));
    }
}
