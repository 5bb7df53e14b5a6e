//! docchat - ask questions about local documents with hosted models

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use config::AppConfig;
use tracing_subscriber::EnvFilter;

pub use error::CliError;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries answers only
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},aws_config=warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // One request at a time: a current-thread runtime is enough
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(run_command(cli))
}

async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    tracing::debug!(paths = ?config.paths, models = ?config.models, "configuration loaded");

    match cli.command {
        Commands::Chat => {
            commands::chat::run(config).await?;
        }

        Commands::Ingest { data_dir } => {
            commands::ingest::run(config, data_dir).await?;
        }

        Commands::Ask {
            question,
            model,
            top_k,
            show_sources,
        } => {
            commands::ask::run(config, &question, model.into(), top_k, show_sources).await?;
        }

        Commands::GenerateText {
            prompt,
            max_tokens,
            temperature,
            top_p,
        } => {
            commands::generate_text::run(config, prompt, max_tokens, temperature, top_p).await?;
        }

        Commands::GenerateImage {
            prompt,
            output_dir,
            seed,
        } => {
            commands::generate_image::run(config, prompt, output_dir, seed).await?;
        }

        Commands::Config => {
            commands::config_cmd::run_show(&config)?;
        }
    }

    Ok(())
}
