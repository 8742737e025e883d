//! Even time-range splitting

use crate::domain::model::TimeRange;
use crate::error::{SplicerError, SplicerResult};

/// Splits a duration into contiguous parts of (almost) equal length.
///
/// Work is done in whole milliseconds so ranges are exactly contiguous and
/// always sum to the total; the last range absorbs the remainder.
pub struct SegmentPlanner;

impl SegmentPlanner {
    /// Split `total_seconds` into `parts` ranges starting at zero
    pub fn split(total_seconds: f64, parts: u32) -> SplicerResult<Vec<TimeRange>> {
        if parts < 1 {
            return Err(SplicerError::invalid("parts must be >= 1"));
        }
        if !total_seconds.is_finite() || total_seconds <= 0.0 {
            return Err(SplicerError::invalid(format!(
                "total duration must be a positive number of seconds, got {}",
                total_seconds
            )));
        }

        let total_ms = (total_seconds * 1000.0).round() as u64;
        let parts = parts as u64;
        if total_ms < parts {
            return Err(SplicerError::invalid(format!(
                "{:.3}s is too short to split into {} parts",
                total_seconds, parts
            )));
        }

        let base_ms = total_ms / parts;
        let ranges = (0..parts)
            .map(|i| {
                let start_ms = i * base_ms;
                let duration_ms = if i == parts - 1 {
                    total_ms - start_ms
                } else {
                    base_ms
                };
                TimeRange {
                    start_seconds: ms_to_seconds(start_ms),
                    duration_seconds: ms_to_seconds(duration_ms),
                }
            })
            .collect();

        Ok(ranges)
    }
}

fn ms_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
