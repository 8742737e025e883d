// Application layer - Use case interactors

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{SplicerError, SplicerResult};
use crate::ports::DownloadPort;
use crate::utils::path::PathUtils;

pub mod analyze_interactor;
pub mod container;
pub mod merge_interactor;
pub mod split_interactor;

#[cfg(test)]
pub(crate) mod mocks;

// Re-export interactors
pub use analyze_interactor::{AnalyzeInteractor, AnalyzeReport};
pub use container::{AppContainer, DefaultAppContainer};
pub use merge_interactor::{MergeInteractor, MergeRequest, MergeResponse};
pub use split_interactor::{SplitInteractor, SplitRequest, SplitResponse};

/// Turn a source argument into a local file.
///
/// URLs go through the download port into `raw_dir`; local paths must exist.
pub(crate) async fn resolve_source(
    download: &dyn DownloadPort,
    source: &str,
    raw_dir: &Path,
) -> SplicerResult<PathBuf> {
    if PathUtils::is_url(source) {
        info!("Resolving remote source: {}", source);
        return download.fetch(source.trim(), raw_dir).await;
    }

    let path = PathBuf::from(source);
    if !path.is_file() {
        return Err(SplicerError::invalid(format!(
            "Input file does not exist: {}",
            path.display()
        )));
    }
    Ok(path)
}
