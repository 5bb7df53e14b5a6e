//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use docchat_foundation::rag::ModelChoice;
use std::path::PathBuf;

/// docchat - chat with your documents through hosted models
#[derive(Parser)]
#[command(name = "docchat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path (default: docchat.toml or docchat.yaml)
    #[arg(short = 'c', long, global = true, env = "DOCCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Interactive loop: ask questions, pick a model, rebuild the index
    Chat,

    /// Rebuild the vector index from the documents directory
    Ingest {
        /// Documents directory (overrides paths.data_dir)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Answer one question from the indexed documents
    Ask {
        /// The question
        question: String,

        /// Model that writes the answer
        #[arg(short, long, value_enum, default_value_t = ModelArg::J2)]
        model: ModelArg,

        /// Chunks placed in the prompt (overrides retrieval.top_k)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Print the retrieved chunks after the answer
        #[arg(short, long)]
        show_sources: bool,
    },

    /// Send one prompt to Jurassic-2 and print the completion
    GenerateText {
        /// Prompt text (defaults to the Shakespeare poem prompt)
        #[arg(short, long)]
        prompt: Option<String>,

        /// Maximum tokens to generate (overrides generation.max_tokens)
        #[arg(long)]
        max_tokens: Option<u32>,

        /// Sampling temperature (overrides generation.temperature, else 0.8)
        #[arg(long)]
        temperature: Option<f32>,

        /// Nucleus sampling cutoff (overrides generation.top_p, else 0.8)
        #[arg(long)]
        top_p: Option<f32>,
    },

    /// Generate one image with Stable Diffusion XL and save it as PNG
    GenerateImage {
        /// Prompt text (defaults to the beach scene prompt)
        #[arg(short, long)]
        prompt: Option<String>,

        /// Output directory (overrides paths.output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Sampling seed (overrides image.seed)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Answering model accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelArg {
    /// AI21 Jurassic-2 Mid
    J2,
    /// Meta Llama 2 70B Chat
    Llama2,
}

impl From<ModelArg> for ModelChoice {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::J2 => ModelChoice::Jurassic2,
            ModelArg::Llama2 => ModelChoice::Llama2,
        }
    }
}
