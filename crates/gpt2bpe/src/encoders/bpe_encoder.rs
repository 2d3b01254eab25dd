//! # Byte-Level BPE Encoder

use core::{fmt::Debug, num::NonZeroUsize};
use std::sync::Arc;

use crate::{
    encoders::{
        TokenEncoder,
        merge_scan::reduce_chunk,
        reduction_cache::ReductionCache,
    },
    errors::BpeResult,
    segmentation::TextSegmentor,
    types::TokenType,
    vocab::{ByteUnicodeCodec, UnifiedBpeVocab},
};

/// GPT-2 byte-level BPE [`TokenEncoder`].
///
/// For each chunk of the pretokenized text:
/// bytes -> [`ByteUnicodeCodec`] -> merge reduction (cached) -> vocabulary ids.
pub struct BpeTokenEncoder<T: TokenType> {
    vocab: Arc<UnifiedBpeVocab<T>>,
    segmentor: TextSegmentor,
    codec: ByteUnicodeCodec,
    cache: Option<ReductionCache>,
}

impl<T: TokenType> Debug for BpeTokenEncoder<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("BpeTokenEncoder")
            .field("pattern", self.vocab.pattern())
            .field("tokens", &self.vocab.vocabulary().len())
            .field("merges", &self.vocab.ranks().len())
            .field("cache", &self.cache)
            .finish()
    }
}

impl<T: TokenType> BpeTokenEncoder<T> {
    /// Build an encoder.
    ///
    /// ## Arguments
    /// * `vocab` - The shared vocabulary.
    /// * `cache_capacity` - Total reduction cache entries; ``0`` disables the cache.
    /// * `max_pool` - Limit on regex clones and cache shards; if None, lib defaults are used.
    pub fn new(
        vocab: Arc<UnifiedBpeVocab<T>>,
        cache_capacity: usize,
        max_pool: Option<NonZeroUsize>,
    ) -> BpeResult<Self> {
        let cache = NonZeroUsize::new(cache_capacity).map(|c| ReductionCache::new(c, max_pool));
        Self::init(vocab, cache, max_pool)
    }

    /// Build an encoder with an explicit (or no) reduction cache.
    ///
    /// ## Arguments
    /// * `vocab` - The shared vocabulary.
    /// * `cache` - The reduction cache; None disables caching.
    /// * `max_pool` - Limit on regex clones; if None, lib defaults are used.
    pub fn init(
        vocab: Arc<UnifiedBpeVocab<T>>,
        cache: Option<ReductionCache>,
        max_pool: Option<NonZeroUsize>,
    ) -> BpeResult<Self> {
        let segmentor = TextSegmentor::from_pattern(vocab.pattern().clone(), max_pool)?;

        Ok(Self {
            vocab,
            segmentor,
            codec: ByteUnicodeCodec::default(),
            cache,
        })
    }

    /// The shared vocabulary.
    pub fn vocab(&self) -> &Arc<UnifiedBpeVocab<T>> {
        &self.vocab
    }

    /// The pretokenizer.
    pub fn segmentor(&self) -> &TextSegmentor {
        &self.segmentor
    }

    /// The reduction cache, if enabled.
    pub fn cache(&self) -> Option<&ReductionCache> {
        self.cache.as_ref()
    }

    /// Reduce one byte/unicode encoded chunk, through the cache when enabled.
    pub fn reduce_encoded_chunk(
        &self,
        encoded: &str,
    ) -> BpeResult<Arc<[String]>> {
        match &self.cache {
            Some(cache) => cache.get_or_reduce(encoded, self.vocab.ranks()),
            None => Ok(reduce_chunk(encoded, self.vocab.ranks())?.into()),
        }
    }

    /// Encode one already-pretokenized chunk, appending ids to `tokens`.
    pub fn try_encode_chunk_append(
        &self,
        chunk: &str,
        tokens: &mut Vec<T>,
    ) -> BpeResult<()> {
        let encoded = self.codec.encode_bytes(chunk.as_bytes());
        let symbols = self.reduce_encoded_chunk(&encoded)?;

        let vocabulary = self.vocab.vocabulary();
        for symbol in symbols.iter() {
            tokens.push(vocabulary.try_token_id(symbol)?);
        }
        Ok(())
    }

    /// Encode one already-pretokenized chunk.
    pub fn try_encode_chunk(
        &self,
        chunk: &str,
    ) -> BpeResult<Vec<T>> {
        let mut tokens = Vec::with_capacity(chunk.len());
        self.try_encode_chunk_append(chunk, &mut tokens)?;
        Ok(tokens)
    }
}

impl<T: TokenType> TokenEncoder<T> for BpeTokenEncoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, tokens)))]
    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> BpeResult<()> {
        self.segmentor.for_each_span(text, |span| {
            self.try_encode_chunk_append(&text[span.range().clone()], tokens)
        })
    }
}
