use std::sync::Arc;

use crate::adapters::{AppConfig, FFmpegAdapter, FFprobeAdapter, YtDlpAdapter};
use crate::app::{
    analyze_interactor::AnalyzeInteractor, merge_interactor::MergeInteractor,
    split_interactor::SplitInteractor,
};
use crate::planner::ConcatPlanner;
use crate::ports::{DownloadPort, ExecutePort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn merge_interactor(&self) -> Arc<MergeInteractor>;
    fn split_interactor(&self) -> Arc<SplitInteractor>;
    fn analyze_interactor(&self) -> Arc<AnalyzeInteractor>;
}

pub struct DefaultAppContainer {
    merge_interactor: Arc<MergeInteractor>,
    split_interactor: Arc<SplitInteractor>,
    analyze_interactor: Arc<AnalyzeInteractor>,
}

impl DefaultAppContainer {
    /// Wire the real adapters from configuration
    pub fn new(config: &AppConfig) -> Self {
        let probe_port = Arc::new(FFprobeAdapter::new(&config.tools.ffprobe));
        let execute_port = Arc::new(FFmpegAdapter::new(&config.tools.ffmpeg));
        let download_port = Arc::new(
            YtDlpAdapter::new(&config.tools.ytdlp, config.download.format.clone())
                .with_cookies(config.download.cookies.clone()),
        );

        let raw_dir = config.paths.raw_dir();
        let output_dir = config.paths.output_dir();

        let merge_interactor = Arc::new(MergeInteractor::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
            Arc::clone(&execute_port) as Arc<dyn ExecutePort>,
            Arc::clone(&download_port) as Arc<dyn DownloadPort>,
            ConcatPlanner::with_settings(config.merge.encode_settings()),
            raw_dir.clone(),
            output_dir.clone(),
        ));

        let split_interactor = Arc::new(SplitInteractor::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
            Arc::clone(&execute_port) as Arc<dyn ExecutePort>,
            Arc::clone(&download_port) as Arc<dyn DownloadPort>,
            config.split.encode_settings(),
            config.split.overlay.clone(),
            raw_dir,
            output_dir,
        ));

        let analyze_interactor = Arc::new(AnalyzeInteractor::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
            ConcatPlanner::with_settings(config.merge.encode_settings()),
        ));

        Self {
            merge_interactor,
            split_interactor,
            analyze_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn merge_interactor(&self) -> Arc<MergeInteractor> {
        Arc::clone(&self.merge_interactor)
    }

    fn split_interactor(&self) -> Arc<SplitInteractor> {
        Arc::clone(&self.split_interactor)
    }

    fn analyze_interactor(&self) -> Arc<AnalyzeInteractor> {
        Arc::clone(&self.analyze_interactor)
    }
}
