//! tweetload CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tweetload::{
    error::Result,
    models::{Config, OutputLayer},
    pipeline,
    storage::LocalSink,
};

/// tweetload - Twitter timeline loader
#[derive(Parser, Debug)]
#[command(
    name = "tweetload",
    version,
    about = "Load recent tweets of configured users as XML documents"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "tweetload.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch timelines and write one document per tweet
    Generate {
        /// Output directory (default: output.dir from the configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the maximum number of tweets per user
        #[arg(long)]
        max: Option<u32>,
    },

    /// Validate the configuration file
    Validate,

    /// Show the output directory contents
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(&cli.config)?;
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Generate { output, max } => {
            if let Some(max) = max {
                config.max = max;
            }
            config.validate()?;
            config.log_values();

            let dir = output.unwrap_or_else(|| PathBuf::from(&config.output.dir));
            let sink = LocalSink::new(&dir);
            let stats = pipeline::run(&config, &sink).await?;

            log::info!(
                "{} new documents written to {} ({} duplicates skipped)",
                stats.documents_sent,
                dir.display(),
                stats.duplicates
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            config.log_values();
            log::info!(
                "✓ Config OK ({} users, max {} tweets each)",
                config.users.len(),
                config.max
            );
        }

        Command::Info => {
            let sink = LocalSink::new(&config.output.dir);
            log::info!("Output directory: {}", sink.root().display());
            for layer in [OutputLayer::Contents, OutputLayer::Original, OutputLayer::Metadata] {
                let count = sink.count_documents(layer).await?;
                if count > 0 {
                    log::info!("  {layer}: {count} documents");
                }
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
