use crate::services::embedding::{EmbeddingError, TextEncoder};
use async_trait::async_trait;
use std::time::Duration;

/// Caching decorator over a [`TextEncoder`].
///
/// Keys the in-memory cache by the exact input text, which is sound because
/// encoding is deterministic. Repeated match requests against a stable
/// scholarship catalog skip re-encoding entirely.
pub struct CachedEncoder<E> {
    inner: E,
    cache: moka::future::Cache<String, Vec<f32>>,
}

impl<E: TextEncoder> CachedEncoder<E> {
    /// Create a caching encoder with the given capacity and entry TTL.
    pub fn new(inner: E, capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    /// Number of vectors currently cached
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl<E: TextEncoder> TextEncoder for CachedEncoder<E> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if let Some(vector) = self.cache.get(text).await {
            tracing::trace!("embedding cache hit");
            return Ok(vector);
        }

        let vector = self.inner.embed(text).await?;
        self.cache.insert(text.to_string(), vector.clone()).await;
        Ok(vector)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        // Serve hits from the cache and embed only the misses, reassembling
        // the results in input order.
        let mut results: Vec<Option<Vec<f32>>> = Vec::with_capacity(texts.len());
        let mut misses: Vec<String> = Vec::new();
        let mut miss_positions: Vec<usize> = Vec::new();

        for (position, text) in texts.iter().enumerate() {
            match self.cache.get(text).await {
                Some(vector) => results.push(Some(vector)),
                None => {
                    results.push(None);
                    misses.push(text.clone());
                    miss_positions.push(position);
                }
            }
        }

        tracing::trace!(
            "embedding batch: {} cached, {} to encode",
            texts.len() - misses.len(),
            misses.len()
        );

        if !misses.is_empty() {
            let vectors = self.inner.embed_batch(&misses).await?;
            if vectors.len() != misses.len() {
                return Err(EmbeddingError::Inference(format!(
                    "encoder returned {} vectors for {} inputs",
                    vectors.len(),
                    misses.len()
                )));
            }

            for ((position, text), vector) in
                miss_positions.into_iter().zip(misses).zip(vectors)
            {
                self.cache.insert(text, vector.clone()).await;
                results[position] = Some(vector);
            }
        }

        results
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| {
                    EmbeddingError::Inference("embedding batch reassembly failed".to_string())
                })
            })
            .collect()
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts how many texts reach the inner encoder.
    struct CountingEncoder {
        encoded: AtomicUsize,
    }

    impl CountingEncoder {
        fn new() -> Self {
            Self {
                encoded: AtomicUsize::new(0),
            }
        }

        fn vector_for(text: &str) -> Vec<f32> {
            vec![text.len() as f32, 1.0]
        }
    }

    #[async_trait]
    impl TextEncoder for CountingEncoder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.encoded.fetch_add(1, Ordering::SeqCst);
            Ok(Self::vector_for(text))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.encoded.fetch_add(texts.len(), Ordering::SeqCst);
            Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "counting-stub"
        }
    }

    #[tokio::test]
    async fn test_repeated_embed_hits_cache() {
        let encoder = CachedEncoder::new(CountingEncoder::new(), 100, 60);

        let first = encoder.embed("same text").await.unwrap();
        let second = encoder.embed("same text").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(encoder.inner.encoded.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_batch_encodes_only_misses() {
        let encoder = CachedEncoder::new(CountingEncoder::new(), 100, 60);

        encoder.embed("alpha").await.unwrap();

        let texts = vec!["alpha".to_string(), "bravo".to_string()];
        let vectors = encoder.embed_batch(&texts).await.unwrap();

        assert_eq!(vectors.len(), 2);
        // "alpha" was already cached, only "bravo" reaches the inner encoder
        assert_eq!(encoder.inner.encoded.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let encoder = CachedEncoder::new(CountingEncoder::new(), 100, 60);

        encoder.embed("bb").await.unwrap();

        let texts = vec!["aaaa".to_string(), "bb".to_string(), "cccccc".to_string()];
        let vectors = encoder.embed_batch(&texts).await.unwrap();

        assert_eq!(vectors[0][0], 4.0);
        assert_eq!(vectors[1][0], 2.0);
        assert_eq!(vectors[2][0], 6.0);
    }

    #[tokio::test]
    async fn test_dimension_and_model_name_pass_through() {
        let encoder = CachedEncoder::new(CountingEncoder::new(), 100, 60);

        assert_eq!(encoder.dimension(), 2);
        assert_eq!(encoder.model_name(), "counting-stub");
    }
}
