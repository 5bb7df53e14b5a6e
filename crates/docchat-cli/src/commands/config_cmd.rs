//! `docchat config` command implementation

use crate::CliError;
use crate::config::AppConfig;

/// Execute the `docchat config` command
pub fn run_show(config: &AppConfig) -> Result<(), CliError> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
