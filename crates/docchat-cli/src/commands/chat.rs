//! `docchat chat` interactive loop

use super::{ask, ingest};
use crate::CliError;
use crate::config::AppConfig;
use crate::context::AppContext;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use docchat_foundation::rag::ModelChoice;

const MENU: &[&str] = &["Update vectors", "Ask Jurassic-2", "Ask Llama 2", "Quit"];

enum Action {
    UpdateVectors,
    Ask(ModelChoice),
    Quit,
}

fn action_for(selection: usize) -> Action {
    match selection {
        0 => Action::UpdateVectors,
        1 => Action::Ask(ModelChoice::Jurassic2),
        2 => Action::Ask(ModelChoice::Llama2),
        _ => Action::Quit,
    }
}

/// Execute the `docchat chat` command
pub async fn run(config: AppConfig) -> Result<(), CliError> {
    let ctx = AppContext::connect(config).await;
    let theme = ColorfulTheme::default();

    println!("{}", "Chat with your documents".bold());
    println!(
        "Documents: {}  Index: {}",
        ctx.config.paths.data_dir.display().to_string().cyan(),
        ctx.config.paths.index_dir.display().to_string().cyan()
    );
    println!();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(MENU)
            .default(1)
            .interact()?;

        let outcome = match action_for(selection) {
            Action::Quit => break,
            Action::UpdateVectors => {
                let data_dir = ctx.config.paths.data_dir.clone();
                ingest::rebuild(&ctx, &data_dir).await.map(|_| ())
            }
            Action::Ask(model) => {
                let question: String = Input::with_theme(&theme)
                    .with_prompt("Ask a question from the PDF files")
                    .allow_empty(true)
                    .interact_text()?;
                ask_once(&ctx, &question, model).await
            }
        };

        if let Err(e) = outcome {
            eprintln!("{} {}", "Error:".red().bold(), e.to_string().red());
        }
        println!();
    }

    Ok(())
}

async fn ask_once(ctx: &AppContext, question: &str, model: ModelChoice) -> Result<(), CliError> {
    let answer = ask::answer(ctx, question, model, ctx.config.retrieval.top_k).await?;
    println!("{}", answer.answer);
    ask::print_sources(&answer);
    Ok(())
}
