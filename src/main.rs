use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// creatorhub - creator subscriptions and paid messages
#[derive(Parser)]
#[command(name = "creatorhub")]
#[command(about = "Creator monetization platform", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Read or write an application setting
    Setting {
        #[command(subcommand)]
        command: SettingCommands,
    },
}

#[derive(Subcommand)]
enum SettingCommands {
    /// Store a value, e.g. `setting set referrals.enabled 1`
    Set { key: String, value: String },
    /// Print a value
    Get { key: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = creatorhub::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    creatorhub::observability::init_observability(
        "creatorhub",
        env!("CARGO_PKG_VERSION"),
        &config.logging.level,
        config.is_production(),
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => migrate_command(config).await,
        Commands::Reset => reset_command(config).await,
        Commands::Setting { command } => setting_command(config, command).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: creatorhub::config::Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    cli::serve(config, host, port).await
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: creatorhub::config::Config) -> Result<()> {
    cli::migrate(config).await
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: creatorhub::config::Config) -> Result<()> {
    cli::reset(config).await
}

#[tracing::instrument(skip_all)]
async fn setting_command(config: creatorhub::config::Config, command: SettingCommands) -> Result<()> {
    match command {
        SettingCommands::Set { key, value } => cli::set_setting(config, key, value).await,
        SettingCommands::Get { key } => cli::get_setting(config, key).await,
    }
}
