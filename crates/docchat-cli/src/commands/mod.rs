//! CLI command implementations

pub mod ask;
pub mod chat;
pub mod config_cmd;
pub mod generate_image;
pub mod generate_text;
pub mod ingest;
