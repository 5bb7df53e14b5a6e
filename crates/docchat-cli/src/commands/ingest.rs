//! `docchat ingest` command implementation

use crate::CliError;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::output::ProgressBar;
use colored::Colorize;
use docchat_foundation::rag::IngestReport;
use std::path::{Path, PathBuf};

/// Execute the `docchat ingest` command
pub async fn run(config: AppConfig, data_dir: Option<PathBuf>) -> Result<(), CliError> {
    // Reject bad chunking before any AWS setup
    config.chunking.chunk_config().validate()?;

    let data_dir = data_dir.unwrap_or_else(|| config.paths.data_dir.clone());
    let ctx = AppContext::connect(config).await;

    rebuild(&ctx, &data_dir).await?;
    Ok(())
}

/// Rebuild the index from `data_dir` behind a spinner and print a summary.
pub async fn rebuild(ctx: &AppContext, data_dir: &Path) -> Result<IngestReport, CliError> {
    let ingestor = ctx.ingestor()?;
    let spinner = ProgressBar::new_spinner(&format!(
        "Embedding documents from {}...",
        data_dir.display()
    ));

    match ingestor.ingest(data_dir).await {
        Ok(report) => {
            spinner.finish_with_message(&format!(
                "{} Indexed {} chunks from {} documents into {}",
                "✓".green(),
                report.manifest.chunk_count,
                report.documents,
                ctx.index_store().dir().display()
            ));
            Ok(report)
        }
        Err(e) => {
            spinner.abandon_with_message(&format!("{} Ingestion failed", "✗".red()));
            Err(e.into())
        }
    }
}
