//! ffprobe JSON model and normalization
//!
//! Only the first video and the first audio stream, in declaration order,
//! make it into the descriptor. Later streams of the same kind are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::domain::model::{AudioStream, StreamDescriptor, VideoStream};
use crate::error::{SplicerError, SplicerResult};

/// Top level of `ffprobe -print_format json -show_streams -show_format`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FfprobeOutput {
    #[serde(default)]
    pub streams: Vec<FfprobeStream>,
    #[serde(default)]
    pub format: Option<FfprobeFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FfprobeStream {
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub pix_fmt: Option<String>,
    pub r_frame_rate: Option<String>,
    pub avg_frame_rate: Option<String>,
    /// ffprobe reports this as a string, e.g. "48000"
    pub sample_rate: Option<String>,
    pub channels: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FfprobeFormat {
    pub format_name: Option<String>,
    /// Seconds as a decimal string
    pub duration: Option<String>,
}

/// Parse a frame rate given as `"30000/1001"`, `"30/1"` or `"29.97"`.
///
/// Anything malformed, empty, negative or with a zero denominator yields 0.0.
pub fn parse_frame_rate(value: &str) -> f64 {
    let value = value.trim();
    let rate = match value.split_once('/') {
        Some((num, den)) => match (num.trim().parse::<f64>(), den.trim().parse::<f64>()) {
            (Ok(num), Ok(den)) if den != 0.0 => num / den,
            _ => 0.0,
        },
        None => value.parse::<f64>().unwrap_or(0.0),
    };

    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        0.0
    }
}

/// Parse raw ffprobe JSON for `path` into a descriptor
pub fn parse_probe_output(path: &Path, json: &str) -> SplicerResult<StreamDescriptor> {
    let output: FfprobeOutput = serde_json::from_str(json).map_err(|e| {
        SplicerError::probe(path.display().to_string(), format!("unparseable ffprobe output: {}", e))
    })?;
    output.into_descriptor(path)
}

impl FfprobeOutput {
    /// Normalize into a descriptor, validating the selected streams
    pub fn into_descriptor(self, path: &Path) -> SplicerResult<StreamDescriptor> {
        let display = path.display().to_string();
        let format = self.format.unwrap_or_default();

        let duration_seconds = match format.duration.as_deref().map(str::trim) {
            None | Some("") | Some("N/A") => 0.0,
            Some(raw) => match raw.parse::<f64>() {
                Ok(d) if d.is_finite() && d >= 0.0 => d,
                _ => {
                    return Err(SplicerError::probe(
                        display,
                        format!("invalid duration '{}'", raw),
                    ))
                }
            },
        };

        let video = self
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .map(|s| video_stream(s, &display))
            .transpose()?;

        let audio = self
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("audio"))
            .map(|s| audio_stream(s, &display))
            .transpose()?;

        Ok(StreamDescriptor {
            path: path.to_path_buf(),
            container_format: format.format_name.unwrap_or_else(|| "unknown".to_string()),
            duration_seconds,
            video,
            audio,
        })
    }
}

fn codec_name(stream: &FfprobeStream) -> String {
    stream
        .codec_name
        .clone()
        .unwrap_or_else(|| "unknown".to_string())
}

fn video_stream(stream: &FfprobeStream, path: &str) -> SplicerResult<VideoStream> {
    let width = stream.width.unwrap_or(0);
    let height = stream.height.unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(SplicerError::probe(
            path,
            format!("video stream reports invalid dimensions {}x{}", width, height),
        ));
    }

    // r_frame_rate first, avg_frame_rate when it is missing or empty
    let rate = stream
        .r_frame_rate
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .or(stream.avg_frame_rate.as_deref())
        .unwrap_or("");

    Ok(VideoStream {
        codec: codec_name(stream),
        width,
        height,
        pixel_format: stream.pix_fmt.clone(),
        fps: parse_frame_rate(rate),
    })
}

fn audio_stream(stream: &FfprobeStream, path: &str) -> SplicerResult<AudioStream> {
    let sample_rate = stream
        .sample_rate
        .as_deref()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0);
    let channels = stream.channels.unwrap_or(0);
    if sample_rate == 0 || channels == 0 {
        return Err(SplicerError::probe(
            path,
            format!(
                "audio stream reports invalid layout ({} Hz, {} channels)",
                sample_rate, channels
            ),
        ));
    }

    Ok(AudioStream {
        codec: codec_name(stream),
        sample_rate,
        channels,
    })
}
