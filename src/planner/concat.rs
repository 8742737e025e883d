//! Concat strategy selection

use std::path::PathBuf;

use tracing::info;

use crate::domain::model::{CompatibilityVerdict, ConcatPlan, EncodeSettings};

/// Chooses between direct stream-copy concatenation and re-encoding
#[derive(Debug, Clone, Default)]
pub struct ConcatPlanner {
    settings: EncodeSettings,
}

impl ConcatPlanner {
    /// Create a planner with the default re-encode settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a planner with custom re-encode settings
    pub fn with_settings(settings: EncodeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EncodeSettings {
        &self.settings
    }

    /// Select a plan for the given inputs.
    ///
    /// `force_reencode` ignores the verdict entirely. This is also how the
    /// execution layer obtains the fallback plan after a failed direct copy.
    pub fn plan(
        &self,
        inputs: &[PathBuf],
        verdict: &CompatibilityVerdict,
        force_reencode: bool,
    ) -> ConcatPlan {
        let inputs = inputs.to_vec();

        if force_reencode {
            info!("Re-encode forced, skipping compatibility verdict");
            return self.transcode(inputs);
        }

        if verdict.is_compatible() {
            info!("Inputs are compatible, using direct stream copy");
            ConcatPlan::DirectCopy { inputs }
        } else {
            info!(
                "Inputs are incompatible ({} reasons), re-encoding",
                verdict.reasons().len()
            );
            self.transcode(inputs)
        }
    }

    fn transcode(&self, inputs: Vec<PathBuf>) -> ConcatPlan {
        ConcatPlan::TranscodeThenConcat {
            inputs,
            settings: self.settings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> Vec<PathBuf> {
        vec![PathBuf::from("one.mp4"), PathBuf::from("two.mp4")]
    }

    #[test]
    fn test_compatible_verdict_selects_direct_copy() {
        let planner = ConcatPlanner::new();
        let verdict = CompatibilityVerdict::from_reasons(vec![]);

        let plan = planner.plan(&inputs(), &verdict, false);
        assert_eq!(plan, ConcatPlan::DirectCopy { inputs: inputs() });
    }

    #[test]
    fn test_incompatible_verdict_selects_transcode_with_defaults() {
        let planner = ConcatPlanner::new();
        let verdict = CompatibilityVerdict::from_reasons(vec!["codec".to_string()]);

        match planner.plan(&inputs(), &verdict, false) {
            ConcatPlan::TranscodeThenConcat { inputs: got, settings } => {
                assert_eq!(got, inputs());
                assert_eq!(settings.video_codec, "libx264");
                assert_eq!(settings.crf, 20);
                assert_eq!(settings.preset, "veryfast");
                assert_eq!(settings.audio_codec, "aac");
                assert_eq!(settings.audio_bitrate_kbps, 128);
            }
            other => panic!("expected transcode plan, got {:?}", other),
        }
    }

    #[test]
    fn test_force_reencode_ignores_compatible_verdict() {
        let planner = ConcatPlanner::new();
        let compatible = CompatibilityVerdict::from_reasons(vec![]);
        let incompatible = CompatibilityVerdict::from_reasons(vec!["fps".to_string()]);

        assert!(!planner.plan(&inputs(), &compatible, true).is_direct_copy());
        assert!(!planner.plan(&inputs(), &incompatible, true).is_direct_copy());
    }

    #[test]
    fn test_custom_settings_flow_into_plan() {
        let settings = EncodeSettings {
            crf: 23,
            preset: "fast".to_string(),
            ..EncodeSettings::default()
        };
        let planner = ConcatPlanner::with_settings(settings.clone());
        let verdict = CompatibilityVerdict::from_reasons(vec![]);

        let plan = planner.plan(&inputs(), &verdict, true);
        assert_eq!(
            plan,
            ConcatPlan::TranscodeThenConcat {
                inputs: inputs(),
                settings
            }
        );
    }

    #[test]
    fn test_plan_is_deterministic() {
        let planner = ConcatPlanner::new();
        let verdict = CompatibilityVerdict::from_reasons(vec!["x".to_string()]);
        assert_eq!(
            planner.plan(&inputs(), &verdict, false),
            planner.plan(&inputs(), &verdict, false)
        );
    }
}
