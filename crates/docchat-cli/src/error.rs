use docchat_kernel::DocChatError;
use docchat_kernel::config::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("{0}")]
    DocChat(#[from] DocChatError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialoguer error: {0}")]
    DialoguerError(#[from] dialoguer::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::ser::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
