//! `docchat generate-text` command implementation

use crate::CliError;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::output::ProgressBar;
use docchat_foundation::llm::{GenerationParams, TextModel};
use docchat_foundation::prompt::DEFAULT_TEXT_PROMPT;
use docchat_kernel::DocChatError;

/// Sampling used when neither the flag nor the config sets a value
pub const DEFAULT_SAMPLING: f32 = 0.8;

/// Execute the `docchat generate-text` command
pub async fn run(
    config: AppConfig,
    prompt: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    top_p: Option<f32>,
) -> Result<(), CliError> {
    let prompt = prompt.unwrap_or_else(|| DEFAULT_TEXT_PROMPT.to_string());
    if prompt.trim().is_empty() {
        return Err(CliError::InvalidInput("prompt must not be empty".to_string()));
    }

    let params = sampling_params(&config.generation, max_tokens, temperature, top_p);

    let ctx = AppContext::connect(config).await;
    let model = ctx.jurassic(params);

    let spinner = ProgressBar::new_spinner(&format!("Asking {}...", model.display_name()));
    let text = model.complete(&prompt).await.map_err(DocChatError::from)?;
    drop(spinner);

    println!("{text}");
    Ok(())
}

/// Flag, then config, then 0.8.
fn sampling_params(
    configured: &GenerationParams,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    top_p: Option<f32>,
) -> GenerationParams {
    GenerationParams::new(max_tokens.unwrap_or(configured.max_tokens))
        .with_temperature(
            temperature
                .or(configured.temperature)
                .unwrap_or(DEFAULT_SAMPLING),
        )
        .with_top_p(top_p.or(configured.top_p).unwrap_or(DEFAULT_SAMPLING))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_everywhere_uses_defaults() {
        let params = sampling_params(&GenerationParams::default(), None, None, None);
        assert_eq!(params.max_tokens, 512);
        assert_eq!(params.temperature, Some(DEFAULT_SAMPLING));
        assert_eq!(params.top_p, Some(DEFAULT_SAMPLING));
    }

    #[test]
    fn config_values_are_used() {
        let configured = GenerationParams::new(256).with_temperature(0.2).with_top_p(0.5);
        let params = sampling_params(&configured, None, None, None);
        assert_eq!(params.max_tokens, 256);
        assert_eq!(params.temperature, Some(0.2));
        assert_eq!(params.top_p, Some(0.5));
    }

    #[test]
    fn flags_win_over_config() {
        let configured = GenerationParams::new(256).with_temperature(0.2).with_top_p(0.5);
        let params = sampling_params(&configured, Some(100), Some(1.0), Some(0.9));
        assert_eq!(params.max_tokens, 100);
        assert_eq!(params.temperature, Some(1.0));
        assert_eq!(params.top_p, Some(0.9));
    }
}
