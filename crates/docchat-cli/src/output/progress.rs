//! Progress indicators for long-running operations

use indicatif::{ProgressBar as IndicatifProgressBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

/// Spinner shown on stderr while a remote call or ingestion runs
pub struct ProgressBar {
    inner: IndicatifProgressBar,
}

impl ProgressBar {
    /// Create a new spinner for indeterminate operations
    pub fn new_spinner(message: &str) -> Self {
        let pb = IndicatifProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(style) = IndicatifStyle::default_spinner().template(SPINNER_TEMPLATE) {
            pb.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        pb.set_message(message.to_string());
        Self { inner: pb }
    }

    /// Finish the spinner with a message
    pub fn finish_with_message(&self, message: &str) {
        self.inner.finish_with_message(message.to_string());
    }

    /// Abandon with message
    pub fn abandon_with_message(&self, message: &str) {
        self.inner.abandon_with_message(message.to_string());
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        if !self.inner.is_finished() {
            self.inner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_template_parses() {
        assert!(IndicatifStyle::default_spinner().template(SPINNER_TEMPLATE).is_ok());
    }
}
