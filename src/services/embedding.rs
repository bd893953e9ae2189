use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Embedding dimension of the all-MiniLM-L6-v2 model
pub const EMBEDDING_DIMENSION: usize = 384;

/// Documents are embedded in small batches to bound peak memory during ONNX
/// inference.
const INFERENCE_BATCH_SIZE: usize = 16;

/// Errors that can occur during embedding generation
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("invalid input text: {0}")]
    InvalidInput(String),

    #[error("model initialization failed: {0}")]
    ModelInit(String),

    #[error("embedding inference failed: {0}")]
    Inference(String),
}

/// Trait for text encoders producing fixed-dimension embedding vectors.
///
/// Encoding the same text twice yields identical vectors, which is what makes
/// both caching and the ranking contract sound. Implementations must never
/// produce a zero vector for non-empty input.
#[async_trait]
pub trait TextEncoder: Send + Sync {
    /// Encode a single text into an embedding vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Encode multiple texts, returning vectors in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Dimension of the vectors this encoder produces.
    fn dimension(&self) -> usize;

    /// Identifier of the underlying model.
    fn model_name(&self) -> &str;
}

/// Local encoder backed by fastembed's all-MiniLM-L6-v2 model.
///
/// Inference is synchronous and CPU-bound, so every call goes through
/// `tokio::task::spawn_blocking`. The model is shared behind an `Arc` across
/// workers; the first initialization downloads the model files (~90MB).
pub struct MiniLmEncoder {
    model: Arc<fastembed::TextEmbedding>,
}

impl MiniLmEncoder {
    /// Initialize the embedding model, downloading it on first run.
    ///
    /// # Arguments
    /// * `cache_dir` - Optional directory for the downloaded model files
    pub async fn new(cache_dir: Option<PathBuf>) -> Result<Self, EmbeddingError> {
        let model = tokio::task::spawn_blocking(move || {
            let mut options =
                fastembed::InitOptions::new(fastembed::EmbeddingModel::AllMiniLML6V2)
                    .with_show_download_progress(true);
            if let Some(dir) = cache_dir {
                options = options.with_cache_dir(dir);
            }
            fastembed::TextEmbedding::try_new(options)
        })
        .await
        .map_err(|e| EmbeddingError::ModelInit(format!("spawn_blocking join error: {e}")))?
        .map_err(|e| EmbeddingError::ModelInit(e.to_string()))?;

        Ok(Self {
            model: Arc::new(model),
        })
    }
}

#[async_trait]
impl TextEncoder for MiniLmEncoder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "text cannot be empty".to_string(),
            ));
        }

        let model = Arc::clone(&self.model);
        let input = vec![text.to_string()];
        let mut vectors = tokio::task::spawn_blocking(move || model.embed(input, None))
            .await
            .map_err(|e| EmbeddingError::Inference(format!("spawn_blocking join error: {e}")))?
            .map_err(|e| EmbeddingError::Inference(e.to_string()))?;

        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::Inference("empty embedding result".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if texts.iter().any(|t| t.trim().is_empty()) {
            return Err(EmbeddingError::InvalidInput(
                "all texts must be non-empty".to_string(),
            ));
        }

        let model = Arc::clone(&self.model);
        let inputs = texts.to_vec();
        tokio::task::spawn_blocking(move || model.embed(inputs, Some(INFERENCE_BATCH_SIZE)))
            .await
            .map_err(|e| EmbeddingError::Inference(format!("spawn_blocking join error: {e}")))?
            .map_err(|e| EmbeddingError::Inference(e.to_string()))
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    fn model_name(&self) -> &str {
        "all-MiniLM-L6-v2"
    }
}
