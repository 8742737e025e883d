//! ffmpeg argument builders
//!
//! Kept free of I/O so the exact command lines can be unit tested.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::model::EncodeSettings;
use crate::ports::SegmentJob;

fn push_all(args: &mut Vec<OsString>, items: &[&str]) {
    args.extend(items.iter().map(OsString::from));
}

/// One line of a concat demuxer list. Single quotes are closed, escaped and
/// reopened, the only quoting the demuxer understands.
pub fn concat_list_line(path: &Path) -> String {
    let escaped = path.to_string_lossy().replace('\'', r"'\''");
    format!("file '{}'", escaped)
}

/// Full concat demuxer list for the given (absolute) paths
pub fn concat_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| concat_list_line(p))
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

/// `ffmpeg -y -f concat -safe 0 -i list -c copy output`
pub fn direct_concat_args(list: &Path, output: &Path) -> Vec<OsString> {
    let mut args = Vec::new();
    push_all(&mut args, &["-y", "-f", "concat", "-safe", "0", "-i"]);
    args.push(list.as_os_str().to_os_string());
    push_all(&mut args, &["-c", "copy"]);
    args.push(output.as_os_str().to_os_string());
    args
}

/// Re-encode one input into an MPEG-TS intermediate
pub fn transcode_to_ts_args(input: &Path, settings: &EncodeSettings, ts: &Path) -> Vec<OsString> {
    let mut args = Vec::new();
    push_all(&mut args, &["-y", "-i"]);
    args.push(input.as_os_str().to_os_string());
    push_encode_settings(&mut args, settings);
    push_all(&mut args, &["-f", "mpegts"]);
    args.push(ts.as_os_str().to_os_string());
    args
}

/// Join MPEG-TS intermediates with the concat protocol, no re-encode
pub fn ts_concat_args(parts: &[PathBuf], output: &Path) -> Vec<OsString> {
    let joined = parts
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("|");

    let mut args = Vec::new();
    push_all(&mut args, &["-y", "-i"]);
    args.push(OsString::from(format!("concat:{}", joined)));
    push_all(&mut args, &["-c", "copy", "-bsf:a", "aac_adtstoasc"]);
    args.push(output.as_os_str().to_os_string());
    args
}

/// Cut, reformat and overlay one segment in a single encode
pub fn segment_args(job: &SegmentJob, filter: &str) -> Vec<OsString> {
    let mut args = Vec::new();
    push_all(&mut args, &["-y", "-ss"]);
    args.push(format!("{:.3}", job.range.start_seconds).into());
    args.push("-i".into());
    args.push(job.source.as_os_str().to_os_string());
    args.push("-t".into());
    args.push(format!("{:.3}", job.range.duration_seconds).into());
    args.push("-vf".into());
    args.push(filter.into());
    push_encode_settings(&mut args, &job.settings);
    args.push(job.output.as_os_str().to_os_string());
    args
}

fn push_encode_settings(args: &mut Vec<OsString>, settings: &EncodeSettings) {
    let crf = settings.crf.to_string();
    let audio_bitrate = settings.audio_bitrate_arg();
    push_all(
        args,
        &[
            "-c:v",
            settings.video_codec.as_str(),
            "-preset",
            settings.preset.as_str(),
            "-crf",
            crf.as_str(),
            "-pix_fmt",
            settings.pixel_format.as_str(),
            "-c:a",
            settings.audio_codec.as_str(),
            "-b:a",
            audio_bitrate.as_str(),
        ],
    );
}
