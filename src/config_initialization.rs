//! Configuration initialization and hierarchy management

use anyhow::{anyhow, Context, Result};

use crate::adapters::{AppConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands};
use crate::utils::logging::{LogFormat, LogLevel};

/// How many values each layer overrode, logged once logging is up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub env: usize,
    pub cli: usize,
}

/// Build configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> Result<(AppConfig, ConfigOverrides)> {
    build_configuration(cli, |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration`] with an injectable environment
pub fn build_configuration<F>(cli: &Cli, env: F) -> Result<(AppConfig, ConfigOverrides)>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config =
        TomlConfigAdapter::load(cli.config.as_deref()).context("Failed to load configuration file")?;

    let env_overrides = config
        .apply_env(env)
        .context("Invalid environment override")?;

    let cli_overrides = apply_cli_overrides(&mut config, cli)?;

    config.validate().context("Invalid configuration")?;

    Ok((
        config,
        ConfigOverrides {
            env: env_overrides,
            cli: cli_overrides,
        },
    ))
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> Result<usize> {
    let mut overrides = 0;

    if let Some(level) = &cli.log_level {
        config.logging.level =
            LogLevel::parse(level).ok_or_else(|| anyhow!("Unknown log level '{}'", level))?;
        overrides += 1;
    }
    if let Some(format) = &cli.log_format {
        config.logging.format =
            LogFormat::parse(format).ok_or_else(|| anyhow!("Unknown log format '{}'", format))?;
        overrides += 1;
    }
    if let Some(work_dir) = &cli.work_dir {
        config.paths.work_dir = work_dir.clone();
        overrides += 1;
    }

    match &cli.command {
        Commands::Merge(args) => {
            if let Some(crf) = args.crf {
                config.merge.crf = crf;
                overrides += 1;
            }
            if let Some(preset) = &args.preset {
                config.merge.preset = preset.clone();
                overrides += 1;
            }
        }
        Commands::Split(args) => {
            if let Some(parts) = args.parts {
                config.split.parts = parts;
                overrides += 1;
            }
            if let Some(canvas) = &args.canvas {
                config.split.canvas = canvas.clone();
                overrides += 1;
            }
            if let Some(font) = &args.font {
                config.split.overlay.font = Some(font.clone());
                overrides += 1;
            }
        }
        _ => {}
    }

    Ok(overrides)
}
