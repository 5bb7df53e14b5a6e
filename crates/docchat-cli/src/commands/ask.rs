//! `docchat ask` command implementation

use crate::CliError;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::output::ProgressBar;
use colored::Colorize;
use docchat_foundation::rag::{IndexStore, ModelChoice, QaAnswer};
use docchat_kernel::DocChatError;

/// Execute the `docchat ask` command
pub async fn run(
    config: AppConfig,
    question: &str,
    model: ModelChoice,
    top_k: Option<usize>,
    show_sources: bool,
) -> Result<(), CliError> {
    // Fail on a missing index before any AWS setup
    IndexStore::new(&config.paths.index_dir)
        .manifest()
        .map_err(DocChatError::from)?;

    let top_k = top_k.unwrap_or(config.retrieval.top_k);
    let ctx = AppContext::connect(config).await;
    let answer = answer(&ctx, question, model, top_k).await?;

    println!("{}", answer.answer);
    if show_sources {
        print_sources(&answer);
    }
    Ok(())
}

/// Load the current index and answer one question.
pub async fn answer(
    ctx: &AppContext,
    question: &str,
    model: ModelChoice,
    top_k: usize,
) -> Result<QaAnswer, CliError> {
    let qa = ctx.qa(top_k)?;
    let spinner = ProgressBar::new_spinner(&format!("Asking {model}..."));
    let answer = qa.ask(question, model).await?;
    drop(spinner);
    Ok(answer)
}

pub fn print_sources(answer: &QaAnswer) {
    println!();
    println!("{} ({})", "Sources".bold(), answer.model.dimmed());
    for (rank, source) in answer.sources.iter().enumerate() {
        println!(
            "  {}. {} {}",
            rank + 1,
            source.locator().cyan(),
            format!("[{:.3}]", source.score).dimmed()
        );
    }
}
