//! `docchat generate-image` command implementation

use crate::CliError;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::output::ProgressBar;
use colored::Colorize;
use docchat_foundation::artifacts::write_image;
use docchat_foundation::llm::{ImageModel, ModelError};
use docchat_foundation::prompt::DEFAULT_IMAGE_PROMPT;
use docchat_kernel::DocChatError;
use std::path::PathBuf;

/// Execute the `docchat generate-image` command
pub async fn run(
    config: AppConfig,
    prompt: Option<String>,
    output_dir: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<(), CliError> {
    let prompt = prompt.unwrap_or_else(|| DEFAULT_IMAGE_PROMPT.to_string());
    if prompt.trim().is_empty() {
        return Err(CliError::InvalidInput("prompt must not be empty".to_string()));
    }

    let mut request = config.image.request(prompt);
    if let Some(seed) = seed {
        request.seed = seed;
    }
    let output_dir = output_dir.unwrap_or_else(|| config.paths.output_dir.clone());

    let ctx = AppContext::connect(config).await;
    let model = ctx.image_model();

    let spinner = ProgressBar::new_spinner("Generating image...");
    let images = model.generate(&request).await.map_err(DocChatError::from)?;
    drop(spinner);

    let image = images.first().ok_or_else(|| {
        DocChatError::from(ModelError::malformed(model.model_id(), "response has no artifacts"))
    })?;
    let path = write_image(&output_dir, image)?;

    println!("{} Image saved to {}", "✓".green(), path.display());
    Ok(())
}
