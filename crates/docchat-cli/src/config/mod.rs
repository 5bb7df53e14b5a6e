//! Application configuration
//!
//! Every field has a default, so the file is optional. Lookup order:
//! `--config` (or `DOCCHAT_CONFIG`), then `docchat.toml` / `docchat.yaml` /
//! `docchat.yml` in the working directory. `DOCCHAT_`-prefixed environment
//! variables override both, using `__` for nesting
//! (`DOCCHAT_RETRIEVAL__TOP_K=5`).

use docchat_foundation::llm::{
    BedrockConfig, GenerationParams, ImageRequest, J2_MID_V1, LLAMA2_70B_CHAT_V1, SDXL_V0,
    TITAN_EMBED_TEXT_V1,
};
use docchat_foundation::rag::chunker::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use docchat_foundation::rag::{ChunkConfig, ChunkStrategy, DEFAULT_TOP_K};
use docchat_kernel::config::{ConfigError, ConfigResult, load_with_env};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment prefix for overrides
pub const ENV_PREFIX: &str = "DOCCHAT";

/// Config files looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILES: &[&str] = &["docchat.toml", "docchat.yaml", "docchat.yml"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub aws: BedrockConfig,
    pub paths: PathsConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub models: ModelsConfig,
    pub generation: GenerationParams,
    pub image: ImageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned by ingestion
    pub data_dir: PathBuf,
    /// Directory holding the persisted index
    pub index_dir: PathBuf,
    /// Directory generated images are written to
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            index_dir: PathBuf::from("vector_index"),
            output_dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub strategy: ChunkStrategy,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            strategy: ChunkStrategy::Fixed,
        }
    }
}

impl ChunkingConfig {
    pub fn chunk_config(&self) -> ChunkConfig {
        ChunkConfig::new(self.chunk_size, self.chunk_overlap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Chunks placed in the prompt
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Hosted model ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub embedding: String,
    pub jurassic: String,
    pub llama2: String,
    pub image: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            embedding: TITAN_EMBED_TEXT_V1.to_string(),
            jurassic: J2_MID_V1.to_string(),
            llama2: LLAMA2_70B_CHAT_V1.to_string(),
            image: SDXL_V0.to_string(),
        }
    }
}

/// Image generation settings; the prompt comes from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub weight: f32,
    pub cfg_scale: f32,
    pub seed: u64,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        let defaults = ImageRequest::default();
        Self {
            weight: defaults.weight,
            cfg_scale: defaults.cfg_scale,
            seed: defaults.seed,
            steps: defaults.steps,
            width: defaults.width,
            height: defaults.height,
        }
    }
}

impl ImageConfig {
    pub fn request(&self, prompt: impl Into<String>) -> ImageRequest {
        ImageRequest {
            prompt: prompt.into(),
            weight: self.weight,
            cfg_scale: self.cfg_scale,
            seed: self.seed,
            steps: self.steps,
            width: self.width,
            height: self.height,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the first default file found in the
    /// working directory, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let discovered;
        let path = match path {
            Some(p) => Some(p),
            None => {
                discovered = DEFAULT_CONFIG_FILES
                    .iter()
                    .map(PathBuf::from)
                    .find(|p| p.is_file());
                discovered.as_deref()
            }
        };

        let config: Self = load_with_env(path, ENV_PREFIX)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that do not need a remote call.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.retrieval.top_k == 0 {
            return Err(ConfigError::Invalid {
                key: "retrieval.top_k".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.generation.max_tokens == 0 {
            return Err(ConfigError::Invalid {
                key: "generation.max_tokens".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.image.width == 0 || self.image.height == 0 {
            return Err(ConfigError::Invalid {
                key: "image".to_string(),
                reason: format!(
                    "width and height must be non-zero ({}x{})",
                    self.image.width, self.image.height
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_scripts() {
        let config = AppConfig::default();
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
        assert_eq!(config.paths.index_dir, PathBuf::from("vector_index"));
        assert_eq!(config.paths.output_dir, PathBuf::from("output"));
        assert_eq!(config.chunking.chunk_size, 10_000);
        assert_eq!(config.chunking.chunk_overlap, 1_000);
        assert_eq!(config.chunking.strategy, ChunkStrategy::Fixed);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.models.embedding, "amazon.titan-embed-text-v1");
        assert_eq!(config.models.jurassic, "ai21.j2-mid-v1");
        assert_eq!(config.models.llama2, "meta.llama2-70b-chat-v1");
        assert_eq!(config.models.image, "stability.stable-diffusion-xl-v0");
        assert_eq!(config.generation.max_tokens, 512);
        assert_eq!(config.image, ImageConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn image_config_builds_request() {
        let image = ImageConfig {
            seed: 42,
            ..Default::default()
        };
        let request = image.request("a beach");
        assert_eq!(request.prompt, "a beach");
        assert_eq!(request.seed, 42);
        assert_eq!(request.cfg_scale, 10.0);
        assert_eq!(request.steps, 50);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[chunking]\nchunk_size = 2000\nchunk_overlap = 200\n\n[aws]\nregion = \"eu-west-1\""
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.chunking.chunk_size, 2000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.aws.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.paths, PathsConfig::default());
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let mut config = AppConfig::default();
        config.retrieval.top_k = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("retrieval.top_k"));
    }

    #[test]
    fn serializes_to_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("[paths]"));
        assert!(text.contains("data_dir = \"data\""));
        assert!(text.contains("strategy = \"fixed\""));
    }
}
