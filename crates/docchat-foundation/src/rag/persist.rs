//! On-disk form of the similarity index
//!
//! An index directory holds two files:
//!
//! - `manifest.json`: format version, embedding model id, vector
//!   dimensions, chunk count, similarity metric and creation time
//! - `chunks.bin`: the chunks with their embeddings, bincode-encoded
//!
//! Saving stages both files in a temporary sibling directory and renames it
//! over the target, so a reader sees either the previous index or the new
//! one in full. There is no locking; ingesting while another process
//! queries the same directory is unsupported.

use super::vector_store::FlatIndex;
use chrono::{DateTime, Utc};
use docchat_kernel::rag::{DocumentChunk, IndexError, IndexResult, SimilarityMetric};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const CHUNKS_FILE: &str = "chunks.bin";
/// Bumped whenever the on-disk layout changes.
pub const FORMAT_VERSION: u32 = 1;

/// Index metadata stored next to the chunk payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexManifest {
    pub format_version: u32,
    /// Embedding model used at ingestion; queries must use the same one
    pub embedding_model: String,
    pub dimensions: usize,
    pub chunk_count: usize,
    pub metric: SimilarityMetric,
    pub created_at: DateTime<Utc>,
}

impl IndexManifest {
    pub fn describe(index: &FlatIndex, embedding_model: impl Into<String>) -> Self {
        use docchat_kernel::rag::VectorStore;
        Self {
            format_version: FORMAT_VERSION,
            embedding_model: embedding_model.into(),
            dimensions: index.dimensions().unwrap_or(0),
            chunk_count: index.len(),
            metric: index.similarity_metric(),
            created_at: Utc::now(),
        }
    }
}

/// A loaded index and its manifest.
#[derive(Debug, Clone)]
pub struct LoadedIndex {
    pub manifest: IndexManifest,
    pub index: FlatIndex,
}

/// Reads and writes an index directory.
#[derive(Debug, Clone)]
pub struct IndexStore {
    dir: PathBuf,
}

impl IndexStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a manifest exists at the index location.
    pub fn exists(&self) -> bool {
        self.dir.join(MANIFEST_FILE).is_file()
    }

    /// Replace whatever is at the index location with `index`.
    pub fn save(&self, index: &FlatIndex, embedding_model: &str) -> IndexResult<IndexManifest> {
        let manifest = IndexManifest::describe(index, embedding_model);
        let parent = self.parent_dir();
        fs::create_dir_all(&parent)?;

        let staging = tempfile::Builder::new()
            .prefix(".docchat-index-")
            .tempdir_in(&parent)?;

        let manifest_json = serde_json::to_vec_pretty(&manifest)
            .map_err(|e| IndexError::Serialization(e.to_string()))?;
        let payload = bincode::serialize(index.chunks())
            .map_err(|e| IndexError::Serialization(e.to_string()))?;

        fs::write(staging.path().join(CHUNKS_FILE), payload)?;
        fs::write(staging.path().join(MANIFEST_FILE), manifest_json)?;

        self.swap_in(staging.path(), &parent)?;

        tracing::info!(
            dir = %self.dir.display(),
            chunks = manifest.chunk_count,
            dimensions = manifest.dimensions,
            "vector index saved"
        );
        Ok(manifest)
    }

    /// Read only the manifest.
    pub fn manifest(&self) -> IndexResult<IndexManifest> {
        let path = self.dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(IndexError::NotFound(self.dir.display().to_string()));
        }

        let bytes = fs::read(&path)?;
        let manifest: IndexManifest = serde_json::from_slice(&bytes)
            .map_err(|e| IndexError::Corrupt(format!("{}: {e}", path.display())))?;

        if manifest.format_version != FORMAT_VERSION {
            return Err(IndexError::Corrupt(format!(
                "unsupported index format version {} (expected {FORMAT_VERSION})",
                manifest.format_version
            )));
        }
        Ok(manifest)
    }

    /// Load the index, checking the payload against the manifest.
    pub fn load(&self) -> IndexResult<LoadedIndex> {
        let manifest = self.manifest()?;

        let chunks_path = self.dir.join(CHUNKS_FILE);
        let bytes = fs::read(&chunks_path).map_err(|e| {
            IndexError::Corrupt(format!("cannot read {}: {e}", chunks_path.display()))
        })?;
        let chunks: Vec<DocumentChunk> = bincode::deserialize(&bytes)
            .map_err(|e| IndexError::Corrupt(format!("{}: {e}", chunks_path.display())))?;

        if chunks.len() != manifest.chunk_count {
            return Err(IndexError::Corrupt(format!(
                "manifest lists {} chunks, payload has {}",
                manifest.chunk_count,
                chunks.len()
            )));
        }

        let index = FlatIndex::build(chunks, manifest.metric)?;
        if index.chunks()[0].embedding.len() != manifest.dimensions {
            return Err(IndexError::Corrupt(format!(
                "manifest lists {} dimensions, payload has {}",
                manifest.dimensions,
                index.chunks()[0].embedding.len()
            )));
        }

        tracing::debug!(
            dir = %self.dir.display(),
            chunks = manifest.chunk_count,
            "vector index loaded"
        );
        Ok(LoadedIndex { manifest, index })
    }

    fn parent_dir(&self) -> PathBuf {
        match self.dir.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    // Move any existing index aside, rename the staged one into place,
    // then drop the old copy.
    fn swap_in(&self, staged: &Path, parent: &Path) -> IndexResult<()> {
        if !self.dir.exists() {
            fs::rename(staged, &self.dir)?;
            return Ok(());
        }

        let retired = tempfile::Builder::new()
            .prefix(".docchat-index-old-")
            .tempdir_in(parent)?;
        let retired_path = retired.path().join("index");

        fs::rename(&self.dir, &retired_path)?;
        if let Err(e) = fs::rename(staged, &self.dir) {
            // put the previous index back before reporting
            restore_previous(&retired_path, &self.dir);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Move a retired index back into place; `false` if that failed too.
fn restore_previous(retired: &Path, dir: &Path) -> bool {
    match fs::rename(retired, dir) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(
                dir = %dir.display(),
                retired = %retired.display(),
                error = %e,
                "could not restore the previous vector index"
            );
            false
        }
    }
}
