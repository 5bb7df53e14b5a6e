//! CLI context wiring configuration to model clients

use crate::config::AppConfig;
use docchat_foundation::llm::{
    BedrockRuntime, Embedder, GenerationParams, Jurassic2Model, Llama2Model, ModelRuntime,
    StableDiffusionXl, TitanEmbedder,
};
use docchat_foundation::rag::{
    DocumentSplitter, IndexStore, Ingestor, RetrievalQa, TextModels, VectorRetriever,
};
use docchat_kernel::DocChatResult;
use std::sync::Arc;

/// Shared context for CLI commands, holding the model runtime
pub struct AppContext {
    pub config: AppConfig,
    runtime: Arc<dyn ModelRuntime>,
}

impl AppContext {
    /// Resolve AWS settings and build the Bedrock client.
    pub async fn connect(config: AppConfig) -> Self {
        let runtime = BedrockRuntime::new(config.aws.clone()).await;
        Self::with_runtime(config, Arc::new(runtime))
    }

    pub fn with_runtime(config: AppConfig, runtime: Arc<dyn ModelRuntime>) -> Self {
        Self { config, runtime }
    }

    pub fn index_store(&self) -> IndexStore {
        IndexStore::new(&self.config.paths.index_dir)
    }

    pub fn embedder(&self) -> Arc<dyn Embedder> {
        Arc::new(TitanEmbedder::with_model(
            self.runtime.clone(),
            &self.config.models.embedding,
        ))
    }

    /// Both answering models with the configured generation parameters.
    pub fn text_models(&self) -> TextModels {
        TextModels {
            jurassic2: Arc::new(self.jurassic(self.config.generation.clone())),
            llama2: Arc::new(Llama2Model::with_model(
                self.runtime.clone(),
                &self.config.models.llama2,
                self.config.generation.clone(),
            )),
        }
    }

    pub fn jurassic(&self, params: GenerationParams) -> Jurassic2Model {
        Jurassic2Model::with_model(self.runtime.clone(), &self.config.models.jurassic, params)
    }

    pub fn image_model(&self) -> StableDiffusionXl {
        StableDiffusionXl::with_model(self.runtime.clone(), &self.config.models.image)
    }

    pub fn ingestor(&self) -> DocChatResult<Ingestor> {
        let splitter = DocumentSplitter::new(
            self.config.chunking.chunk_config(),
            self.config.chunking.strategy,
        )?;
        Ok(Ingestor::new(splitter, self.embedder(), self.index_store()))
    }

    /// Load the current index and build the QA pipeline over it.
    ///
    /// Called before every question so a rebuilt index is picked up.
    pub fn qa(&self, top_k: usize) -> DocChatResult<RetrievalQa> {
        let retriever = VectorRetriever::open(self.embedder(), &self.index_store())?;
        Ok(RetrievalQa::new(Arc::new(retriever), self.text_models()).with_top_k(top_k))
    }
}
