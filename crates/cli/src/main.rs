use clap::{Parser, Subcommand};
use market_signal_core::config_loader::DEFAULT_CONFIG_PATH;
use market_signal_core::ConfigLoader;

mod commands;
mod notifier;

use commands::{RegimeArgs, RiskArgs, SummaryArgs};

#[derive(Parser)]
#[command(name = "market-signal")]
#[command(about = "Statistical risk and macro regime engine", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Profile overlay, e.g. `dev` reads Config.dev.toml next to the config file
    #[arg(short, long, global = true, env = "MSE_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the latest value of a daily series (z-score, rarity)
    Summary(SummaryArgs),
    /// Compose the multi-factor risk level from normalized factor readings
    Risk(RiskArgs),
    /// Classify the macro regime and record any regime change
    Regime(RegimeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.profile.as_deref() {
        Some(profile) => ConfigLoader::load_with_profile(&cli.config, profile)?,
        None => ConfigLoader::load_from(&cli.config)?,
    };
    tracing::debug!(config = %cli.config, profile = ?cli.profile, "configuration ready");

    match cli.command {
        Commands::Summary(args) => {
            commands::run_summary(args, &config)?;
        }
        Commands::Risk(args) => {
            commands::run_risk(args, &config)?;
        }
        Commands::Regime(args) => {
            commands::run_regime(args, &config).await?;
        }
    }

    Ok(())
}
