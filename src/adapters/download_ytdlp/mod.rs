//! yt-dlp download adapter
//!
//! Downloads remote sources into the raw directory. Tweet/X status URLs and
//! YouTube links are stored under their platform id so a second request for
//! the same post reuses the file already on disk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use crate::adapters::run_tool;
use crate::error::{SplicerError, SplicerResult};
use crate::ports::DownloadPort;
use crate::utils::path::PathUtils;

const TWEET_HOSTS: &[&str] = &[
    "x.com",
    "www.x.com",
    "mobile.x.com",
    "twitter.com",
    "www.twitter.com",
    "mobile.twitter.com",
];

/// Extensions yt-dlp leaves behind for unfinished downloads
const PARTIAL_EXTENSIONS: &[&str] = &["part", "ytdl", "temp"];

/// What kind of remote source a URL points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSource {
    /// Tweet/X status with its numeric id
    Tweet { id: String },
    /// YouTube video, id known when the URL carries it
    YouTube { id: Option<String> },
    /// Anything else yt-dlp may understand
    Other,
}

impl RemoteSource {
    /// Classify a URL. Tweet hosts without a valid status path are rejected.
    pub fn classify(url: &str) -> SplicerResult<Self> {
        let parsed = Url::parse(url.trim()).map_err(|e| download_error(url, e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(download_error(url, "only http(s) URLs are supported"));
        }

        let host = parsed.host_str().unwrap_or("");
        if TWEET_HOSTS.contains(&host) {
            return tweet_id(&parsed)
                .map(|id| RemoteSource::Tweet { id })
                .ok_or_else(|| download_error(url, "not a valid tweet/X status URL"));
        }

        let is_youtube = host == "youtube.com"
            || host.ends_with(".youtube.com")
            || host == "youtu.be";
        if is_youtube {
            return Ok(RemoteSource::YouTube {
                id: youtube_id(&parsed),
            });
        }

        Ok(RemoteSource::Other)
    }

    /// File stem the download is stored under, when known up front
    pub fn cache_key(&self) -> Option<&str> {
        match self {
            RemoteSource::Tweet { id } => Some(id),
            RemoteSource::YouTube { id } => id.as_deref(),
            RemoteSource::Other => None,
        }
    }
}

/// Extract the status id from a tweet/X URL, `None` for anything else
pub fn extract_tweet_id(url: &str) -> Option<String> {
    match RemoteSource::classify(url) {
        Ok(RemoteSource::Tweet { id }) => Some(id),
        _ => None,
    }
}

fn tweet_id(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        [user, kind, id, ..]
            if !user.is_empty()
                && (kind.eq_ignore_ascii_case("status") || kind.eq_ignore_ascii_case("statuses"))
                && is_numeric_id(id) =>
        {
            Some(id.to_string())
        }
        _ => None,
    }
}

fn youtube_id(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    let candidate = if url.host_str() == Some("youtu.be") {
        segments.first().map(|id| id.to_string())
    } else {
        match segments.as_slice() {
            ["watch", ..] => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            ["shorts", id, ..] | ["live", id, ..] | ["embed", id, ..] => Some(id.to_string()),
            _ => None,
        }
    }?;

    let valid = !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(candidate)
}

fn is_numeric_id(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn download_error(url: &str, message: impl Into<String>) -> SplicerError {
    SplicerError::DownloadError {
        url: url.to_string(),
        message: message.into(),
    }
}

/// Find a finished download named `<key>.<ext>` in `dir`
pub fn find_cached(dir: &Path, key: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .find(|path| {
            let stem_matches = path.file_stem().map(|s| s == key).unwrap_or(false);
            let partial = path
                .extension()
                .map(|ext| PARTIAL_EXTENSIONS.iter().any(|p| ext == *p))
                .unwrap_or(false);
            stem_matches && !partial
        })
}

/// yt-dlp-based download adapter
pub struct YtDlpAdapter {
    ytdlp: PathBuf,
    format: String,
    cookies: Option<PathBuf>,
}

impl YtDlpAdapter {
    /// Create new adapter using the given executable and format selector
    pub fn new(ytdlp: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            ytdlp: ytdlp.into(),
            format: format.into(),
            cookies: None,
        }
    }

    /// Pass a Netscape cookies file to every download
    pub fn with_cookies(mut self, cookies: Option<PathBuf>) -> Self {
        self.cookies = cookies;
        self
    }

    fn download_args(&self, url: &str, template: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            self.format.clone().into(),
            "--merge-output-format".into(),
            "mp4".into(),
            "--no-playlist".into(),
            "-o".into(),
            template.as_os_str().to_os_string(),
            "--print".into(),
            "after_move:filepath".into(),
        ];
        if let Some(cookies) = &self.cookies {
            args.push("--cookies".into());
            args.push(cookies.as_os_str().to_os_string());
        }
        args.push("--".into());
        args.push(url.into());
        args
    }
}

/// Output template for a source, `<key>.%(ext)s` or `%(id)s.%(ext)s`
fn output_template(dest_dir: &Path, source: &RemoteSource) -> PathBuf {
    match source.cache_key() {
        Some(key) => dest_dir.join(format!("{}.%(ext)s", key)),
        None => dest_dir.join("%(id)s.%(ext)s"),
    }
}

/// The final path yt-dlp prints is the last non-empty stdout line
fn printed_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}

#[async_trait]
impl DownloadPort for YtDlpAdapter {
    async fn fetch(&self, url: &str, dest_dir: &Path) -> SplicerResult<PathBuf> {
        let source = RemoteSource::classify(url)?;
        debug!("Classified {} as {:?}", url, source);

        if let Some(key) = source.cache_key() {
            if let Some(cached) = find_cached(dest_dir, key) {
                info!("Reusing cached download: {}", cached.display());
                return Ok(cached);
            }
        }

        PathUtils::ensure_dir(dest_dir)?;
        info!("Downloading {} into {}", url, dest_dir.display());

        let template = output_template(dest_dir, &source);
        let output = run_tool(&self.ytdlp, self.download_args(url, &template))
            .await
            .map_err(|e| match e {
                SplicerError::ExecutionError { status, stderr, .. } => {
                    download_error(url, format!("yt-dlp exited with {}: {}", status, stderr))
                }
                other => other,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = printed_path(&stdout)
            .filter(|p| p.exists())
            .or_else(|| source.cache_key().and_then(|key| find_cached(dest_dir, key)))
            .ok_or_else(|| download_error(url, "download finished but the file was not found"))?;

        info!("Downloaded {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tweet_id() {
        assert_eq!(
            extract_tweet_id("https://x.com/someone/status/1790000000000000001"),
            Some("1790000000000000001".to_string())
        );
        assert_eq!(
            extract_tweet_id("http://www.twitter.com/someone/statuses/42?s=20"),
            Some("42".to_string())
        );
        assert_eq!(
            extract_tweet_id("https://mobile.twitter.com/a/status/7/video/1"),
            Some("7".to_string())
        );
        assert_eq!(extract_tweet_id("https://x.com/someone"), None);
        assert_eq!(extract_tweet_id("https://x.com/someone/status/abc"), None);
        assert_eq!(extract_tweet_id("https://example.com/a/status/1"), None);
        assert_eq!(extract_tweet_id("not a url"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            RemoteSource::classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10").unwrap(),
            RemoteSource::YouTube {
                id: Some("dQw4w9WgXcQ".to_string())
            }
        );
        assert_eq!(
            RemoteSource::classify("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            RemoteSource::YouTube {
                id: Some("dQw4w9WgXcQ".to_string())
            }
        );
        assert_eq!(
            RemoteSource::classify("https://www.youtube.com/@channel").unwrap(),
            RemoteSource::YouTube { id: None }
        );
        assert_eq!(
            RemoteSource::classify("https://vimeo.com/123").unwrap(),
            RemoteSource::Other
        );
        assert!(RemoteSource::classify("https://twitter.com/home").is_err());
        assert!(RemoteSource::classify("ftp://x.com/a/status/1").is_err());
    }

    #[test]
    fn test_output_template() {
        let dir = Path::new("raw_videos");
        let tweet = RemoteSource::Tweet {
            id: "99".to_string(),
        };
        assert_eq!(
            output_template(dir, &tweet),
            PathBuf::from("raw_videos/99.%(ext)s")
        );
        assert_eq!(
            output_template(dir, &RemoteSource::Other),
            PathBuf::from("raw_videos/%(id)s.%(ext)s")
        );
    }

    #[test]
    fn test_download_args_with_cookies() {
        let adapter = YtDlpAdapter::new("yt-dlp", "best")
            .with_cookies(Some(PathBuf::from("cookies.txt")));
        let args: Vec<String> = adapter
            .download_args("https://x.com/a/status/1", Path::new("raw/1.%(ext)s"))
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(&args[..2], ["-f", "best"]);
        assert!(args.contains(&"--no-playlist".to_string()));
        assert!(args.windows(2).any(|w| w[0] == "--cookies" && w[1] == "cookies.txt"));
        assert!(args.windows(2).any(|w| w[0] == "--print" && w[1] == "after_move:filepath"));
        assert_eq!(args.last().unwrap(), "https://x.com/a/status/1");
    }

    #[test]
    fn test_printed_path_takes_last_line() {
        assert_eq!(
            printed_path("[info] something\n/raw/1.mp4\n\n"),
            Some(PathBuf::from("/raw/1.mp4"))
        );
        assert_eq!(printed_path("  \n"), None);
    }

    #[test]
    fn test_find_cached_skips_partial_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("123.mp4.part"), b"").unwrap();
        std::fs::write(dir.path().join("456.part"), b"").unwrap();
        assert_eq!(find_cached(dir.path(), "456"), None);

        std::fs::write(dir.path().join("123.mp4"), b"video").unwrap();
        assert_eq!(find_cached(dir.path(), "123"), Some(dir.path().join("123.mp4")));
        assert_eq!(find_cached(dir.path(), "789"), None);
    }

    #[tokio::test]
    async fn test_fetch_reuses_cache_without_running_tool() {
        let dir = tempfile::tempdir().unwrap();
        let cached = dir.path().join("1790000000000000001.mp4");
        std::fs::write(&cached, b"video").unwrap();

        let adapter = YtDlpAdapter::new("/nonexistent/yt-dlp", "best");
        let path = adapter
            .fetch("https://x.com/someone/status/1790000000000000001", dir.path())
            .await
            .unwrap();
        assert_eq!(path, cached);
    }

    #[tokio::test]
    async fn test_fetch_rejects_bad_tweet_url() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = YtDlpAdapter::new("yt-dlp", "best");
        let err = adapter
            .fetch("https://x.com/someone/likes", dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, SplicerError::DownloadError { .. }));
    }
}
