// Domain rules - Business logic and policies

use crate::domain::model::*;
use crate::error::{SplicerError, SplicerResult};

/// Absolute tolerance when comparing frame rates
pub const FPS_TOLERANCE: f64 = 0.01;

/// Decides whether a set of files can be joined without re-encoding.
///
/// The first descriptor is the reference ("file 1") and every other file is
/// compared against it. Any detectable divergence disqualifies direct
/// concatenation, including a pixel format mismatch.
pub struct CompatibilityAnalyzer;

impl CompatibilityAnalyzer {
    /// Analyze descriptors and return a verdict with every mismatch found
    pub fn analyze(descriptors: &[StreamDescriptor]) -> SplicerResult<CompatibilityVerdict> {
        if descriptors.len() < 2 {
            return Err(SplicerError::invalid(format!(
                "at least 2 files are required for a compatibility check, got {}",
                descriptors.len()
            )));
        }

        // Missing video anywhere short-circuits every other comparison
        let videos: Option<Vec<&VideoStream>> =
            descriptors.iter().map(|d| d.video.as_ref()).collect();
        let Some(videos) = videos else {
            return Ok(CompatibilityVerdict::from_reasons(vec![
                "Some file has no detectable video stream".to_string(),
            ]));
        };

        let mut reasons = Vec::new();
        Self::compare_video(&videos, &mut reasons);
        Self::compare_audio(descriptors, &mut reasons);

        Ok(CompatibilityVerdict::from_reasons(reasons))
    }

    fn compare_video(videos: &[&VideoStream], reasons: &mut Vec<String>) {
        let first = videos[0];
        for (idx, video) in videos.iter().enumerate().skip(1) {
            let n = idx + 1;
            if video.codec != first.codec {
                reasons.push(format!(
                    "Video codec differs between 1 and {}: {} != {}",
                    n, first.codec, video.codec
                ));
            }
            if video.width != first.width || video.height != first.height {
                reasons.push(format!(
                    "Resolution differs between 1 and {}: {} != {}",
                    n,
                    first.resolution(),
                    video.resolution()
                ));
            }
            if !fps_close(video.fps, first.fps) {
                reasons.push(format!(
                    "FPS differs between 1 and {}: {:.3} != {:.3}",
                    n, first.fps, video.fps
                ));
            }
            if video.pixel_format != first.pixel_format {
                reasons.push(format!(
                    "Pixel format differs between 1 and {}: {} != {}",
                    n,
                    display_opt(&first.pixel_format),
                    display_opt(&video.pixel_format)
                ));
            }
        }
    }

    fn compare_audio(descriptors: &[StreamDescriptor], reasons: &mut Vec<String>) {
        let with_audio = descriptors.iter().filter(|d| d.has_audio()).count();
        if with_audio == 0 {
            return;
        }
        if with_audio != descriptors.len() {
            reasons.push("Some files have an audio stream and others do not".to_string());
            return;
        }

        let audios: Vec<&AudioStream> = descriptors.iter().filter_map(|d| d.audio.as_ref()).collect();
        let first = audios[0];
        for (idx, audio) in audios.iter().enumerate().skip(1) {
            let n = idx + 1;
            if audio.codec != first.codec {
                reasons.push(format!(
                    "Audio codec differs between 1 and {}: {} != {}",
                    n, first.codec, audio.codec
                ));
            }
            if audio.sample_rate != first.sample_rate {
                reasons.push(format!(
                    "Sample rate differs between 1 and {}: {} != {}",
                    n, first.sample_rate, audio.sample_rate
                ));
            }
            if audio.channels != first.channels {
                reasons.push(format!(
                    "Channel count differs between 1 and {}: {} != {}",
                    n, first.channels, audio.channels
                ));
            }
        }
    }
}

fn fps_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= FPS_TOLERANCE
}

fn display_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unknown")
}
