//! Media probing: normalization of prober output into stream descriptors

pub mod ffprobe;

pub use ffprobe::{parse_frame_rate, parse_probe_output, FfprobeOutput};
