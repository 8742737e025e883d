//! Splicer CLI
//!
//! Merges short clips (local files or tweet/X and YouTube posts) into one
//! file, using lossless concatenation when the inputs allow it, and splits
//! long videos into vertical parts with title and subtitle overlays.
//!
//! # Usage
//!
//! ```bash
//! splicer merge a.mp4 https://x.com/someone/status/1790000000000000001
//! splicer split --source long.mp4 --parts 3 --title "Episode 1"
//! splicer analyze a.mp4 b.mp4 --json
//! splicer plan-layout --width 1920 --height 1080 --title "Hello"
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use splicer_cli::app::DefaultAppContainer;
use splicer_cli::cli::{commands, Cli, Commands};
use splicer_cli::config_initialization::initialize_configuration;
use splicer_cli::utils::logging::init_logging;

/// Main entry point for the Splicer CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, overrides) = initialize_configuration(&cli)?;
    init_logging(&config.logging);

    info!("Starting Splicer CLI");
    info!(
        "Configuration ready ({} environment, {} CLI overrides)",
        overrides.env, overrides.cli
    );

    let container = DefaultAppContainer::new(&config);

    let result = match cli.command {
        Commands::Merge(args) => commands::merge(&container, args).await,
        Commands::Split(args) => commands::split(&container, &config, args).await,
        Commands::Analyze(args) => commands::analyze(&container, args).await,
        Commands::PlanSegments(args) => commands::plan_segments(args),
        Commands::PlanLayout(args) => commands::plan_layout(args, &config.split.overlay),
        Commands::Check => commands::check(&config).await,
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    } else {
        info!("Splicer CLI completed successfully");
    }
    result
}
