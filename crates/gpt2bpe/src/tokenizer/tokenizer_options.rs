use core::num::NonZeroUsize;
use std::{io::Read, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    decoders::{DictionaryDecoder, TokenDecoder},
    encoders::{BpeTokenEncoder, ReductionCache, TokenEncoder},
    errors::BpeResult,
    tokenizer::Tokenizer,
    types::TokenType,
    vocab::UnifiedBpeVocab,
};

/// Default total entry bound of the reduction cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1 << 16;

/// Options for configuring a [`Tokenizer`].
///
/// Missing fields take their defaults when deserialized:
///
/// ```rust
/// use gpt2bpe::TokenizerOptions;
///
/// let options: TokenizerOptions =
///     serde_json::from_str(r#"{"cache_capacity": 0, "parallel": true}"#).unwrap();
/// assert_eq!(options.cache_capacity(), 0);
/// assert!(options.parallel());
/// assert_eq!(options.max_pool(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    cache_capacity: usize,
    cache_shards: Option<NonZeroUsize>,
    max_pool: Option<NonZeroUsize>,
    parallel: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_shards: None,
            max_pool: None,
            parallel: false,
        }
    }
}

impl TokenizerOptions {
    /// Read options from a JSON document.
    pub fn from_json_reader<R: Read>(reader: R) -> BpeResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Gets the total reduction cache capacity.
    ///
    /// ``0`` disables the cache.
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    /// Sets the total reduction cache capacity.
    pub fn set_cache_capacity(
        &mut self,
        cache_capacity: usize,
    ) {
        self.cache_capacity = cache_capacity;
    }

    /// Sets the total reduction cache capacity.
    pub fn with_cache_capacity(
        mut self,
        cache_capacity: usize,
    ) -> Self {
        self.set_cache_capacity(cache_capacity);
        self
    }

    /// Gets the configured cache shard limit.
    ///
    /// If None, falls back to [`Self::max_pool`].
    pub fn cache_shards(&self) -> Option<NonZeroUsize> {
        self.cache_shards
    }

    /// Sets the cache shard limit.
    pub fn set_cache_shards(
        &mut self,
        cache_shards: Option<NonZeroUsize>,
    ) {
        self.cache_shards = cache_shards;
    }

    /// Sets the cache shard limit.
    pub fn with_cache_shards(
        mut self,
        cache_shards: Option<NonZeroUsize>,
    ) -> Self {
        self.set_cache_shards(cache_shards);
        self
    }

    /// Gets the configured max pool size.
    ///
    /// This bounds per-thread regex clones; if None, lib defaults are used.
    pub fn max_pool(&self) -> Option<NonZeroUsize> {
        self.max_pool
    }

    /// Sets the max pool size.
    pub fn set_max_pool(
        &mut self,
        max_pool: Option<NonZeroUsize>,
    ) {
        self.max_pool = max_pool;
    }

    /// Sets the max pool size.
    pub fn with_max_pool(
        mut self,
        max_pool: Option<NonZeroUsize>,
    ) -> Self {
        self.set_max_pool(max_pool);
        self
    }

    /// Gets the configured parallelism value.
    ///
    /// Enabling parallelism will request ``rayon`` batch implementations;
    /// it is ignored without the `rayon` feature.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Sets the configured parallelism value.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Sets the configured parallelism value.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Build the encoder for the given vocab.
    pub fn build_encoder<T: TokenType>(
        &self,
        vocab: Arc<UnifiedBpeVocab<T>>,
    ) -> BpeResult<Arc<dyn TokenEncoder<T>>> {
        let cache = NonZeroUsize::new(self.cache_capacity)
            .map(|c| ReductionCache::new(c, self.cache_shards.or(self.max_pool)));
        let encoder = BpeTokenEncoder::init(vocab, cache, self.max_pool)?;

        #[cfg(feature = "rayon")]
        if self.parallel {
            return Ok(Arc::new(crate::rayon::ParallelRayonEncoder::new(encoder)));
        }

        Ok(Arc::new(encoder))
    }

    /// Build the decoder for the given vocab.
    pub fn build_decoder<T: TokenType>(
        &self,
        vocab: Arc<UnifiedBpeVocab<T>>,
    ) -> Arc<dyn TokenDecoder<T>> {
        let decoder = DictionaryDecoder::from_unified_vocab(vocab);

        #[cfg(feature = "rayon")]
        if self.parallel {
            return Arc::new(crate::rayon::ParallelRayonDecoder::new(decoder));
        }

        Arc::new(decoder)
    }

    /// Build a [`Tokenizer`] for the given vocab.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<UnifiedBpeVocab<T>>,
    ) -> BpeResult<Arc<Tokenizer<T>>> {
        log::debug!("building tokenizer: {self:?}");
        Ok(Tokenizer::new(
            vocab.clone(),
            self.build_encoder(vocab.clone())?,
            self.build_decoder(vocab),
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let options = TokenizerOptions::default();
        assert_eq!(options.cache_capacity(), DEFAULT_CACHE_CAPACITY);
        assert_eq!(options.cache_shards(), None);
        assert_eq!(options.max_pool(), None);
        assert!(!options.parallel());

        let options = options
            .with_cache_capacity(10)
            .with_cache_shards(NonZeroUsize::new(2))
            .with_max_pool(NonZeroUsize::new(3))
            .with_parallel(true);
        assert_eq!(options.cache_capacity(), 10);
        assert_eq!(options.cache_shards(), NonZeroUsize::new(2));
        assert_eq!(options.max_pool(), NonZeroUsize::new(3));
        assert!(options.parallel());
    }

    #[test]
    fn test_json() {
        let options = TokenizerOptions::default()
            .with_cache_capacity(128)
            .with_max_pool(NonZeroUsize::new(4));

        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(
            json,
            r#"{"cache_capacity":128,"cache_shards":null,"max_pool":4,"parallel":false}"#
        );
        assert_eq!(
            TokenizerOptions::from_json_reader(json.as_bytes()).unwrap(),
            options
        );

        assert_eq!(
            TokenizerOptions::from_json_reader("{}".as_bytes()).unwrap(),
            TokenizerOptions::default()
        );
        assert!(TokenizerOptions::from_json_reader(r#"{"max_pool": 0}"#.as_bytes()).is_err());
    }
}
