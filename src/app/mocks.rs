// Mock ports for interactor tests

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::model::*;
use crate::error::{SplicerError, SplicerResult};
use crate::ports::*;

pub fn video_descriptor(path: &str, codec: &str, width: u32, height: u32) -> StreamDescriptor {
    StreamDescriptor {
        path: PathBuf::from(path),
        container_format: "mov,mp4,m4a,3gp,3g2,mj2".to_string(),
        duration_seconds: 10.0,
        video: Some(VideoStream {
            codec: codec.to_string(),
            width,
            height,
            pixel_format: Some("yuv420p".to_string()),
            fps: 30.0,
        }),
        audio: Some(AudioStream {
            codec: "aac".to_string(),
            sample_rate: 48000,
            channels: 2,
        }),
    }
}

/// Returns canned descriptors keyed by path
#[derive(Default)]
pub struct MockProbe {
    descriptors: HashMap<PathBuf, StreamDescriptor>,
}

impl MockProbe {
    pub fn with(mut self, descriptor: StreamDescriptor) -> Self {
        self.descriptors
            .insert(descriptor.path.clone(), descriptor);
        self
    }
}

#[async_trait]
impl ProbePort for MockProbe {
    async fn probe(&self, path: &Path) -> SplicerResult<StreamDescriptor> {
        self.descriptors
            .get(path)
            .cloned()
            .ok_or_else(|| SplicerError::probe(path.display().to_string(), "not mocked"))
    }
}

/// Records every call and fails on request
#[derive(Default)]
pub struct MockExecutor {
    pub fail_direct_copy: bool,
    pub fail_transcode: bool,
    pub fail_segment: Option<usize>,
    pub concat_calls: Mutex<Vec<(ConcatPlan, PathBuf)>>,
    pub segment_calls: Mutex<Vec<SegmentJob>>,
}

fn execution_failure() -> SplicerError {
    SplicerError::ExecutionError {
        tool: "ffmpeg".to_string(),
        status: "exit status: 1".to_string(),
        stderr: "mocked failure".to_string(),
    }
}

#[async_trait]
impl ExecutePort for MockExecutor {
    async fn execute_concat(&self, plan: &ConcatPlan, output: &Path) -> SplicerResult<()> {
        self.concat_calls
            .lock()
            .unwrap()
            .push((plan.clone(), output.to_path_buf()));
        let fail = if plan.is_direct_copy() {
            self.fail_direct_copy
        } else {
            self.fail_transcode
        };
        if fail {
            Err(execution_failure())
        } else {
            Ok(())
        }
    }

    async fn render_segment(&self, job: &SegmentJob) -> SplicerResult<()> {
        let mut calls = self.segment_calls.lock().unwrap();
        calls.push(job.clone());
        if self.fail_segment == Some(calls.len()) {
            Err(execution_failure())
        } else {
            Ok(())
        }
    }
}

/// Maps URLs to local files without touching the network
#[derive(Default)]
pub struct MockDownloader {
    files: HashMap<String, PathBuf>,
    pub calls: Mutex<Vec<(String, PathBuf)>>,
}

impl MockDownloader {
    pub fn with(mut self, url: &str, path: &str) -> Self {
        self.files.insert(url.to_string(), PathBuf::from(path));
        self
    }
}

#[async_trait]
impl DownloadPort for MockDownloader {
    async fn fetch(&self, url: &str, dest_dir: &Path) -> SplicerResult<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), dest_dir.to_path_buf()));
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| SplicerError::DownloadError {
                url: url.to_string(),
                message: "not mocked".to_string(),
            })
    }
}
