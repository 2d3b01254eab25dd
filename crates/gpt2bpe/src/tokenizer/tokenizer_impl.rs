//! # Tokenizer
//!
//! The encoder/decoder pair over one shared vocabulary.

use std::{path::Path, sync::Arc};

use crate::{
    decoders::TokenDecoder,
    encoders::TokenEncoder,
    errors::BpeResult,
    tokenizer::TokenizerOptions,
    types::TokenType,
    vocab::{UnifiedBpeVocab, io::load_datagym_dir},
};

/// Unified Tokenizer.
///
/// Combines:
/// * [`UnifiedBpeVocab`] - the shared vocabulary.
/// * [`TokenEncoder`] - the encoder.
/// * [`TokenDecoder`] - the decoder.
///
/// ## Example
///
/// ```rust,no_run
/// use gpt2bpe::{TokenDecoder, TokenEncoder, Tokenizer, TokenizerOptions};
///
/// fn example() -> gpt2bpe::BpeResult<()> {
///     let tokenizer = Tokenizer::<u32>::from_dir("tokenizer/", TokenizerOptions::default())?;
///
///     let tokens = tokenizer.try_encode("Hello world")?;
///     assert_eq!(tokenizer.try_decode_to_string(&tokens)?, "Hello world");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Tokenizer<T: TokenType> {
    vocab: Arc<UnifiedBpeVocab<T>>,
    encoder: Arc<dyn TokenEncoder<T>>,
    decoder: Arc<dyn TokenDecoder<T>>,
}

impl<T: TokenType> core::fmt::Debug for Tokenizer<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("pattern", self.vocab.pattern())
            .field("tokens", &self.vocab.vocabulary().len())
            .field("merges", &self.vocab.ranks().len())
            .finish()
    }
}

impl<T: TokenType> Tokenizer<T> {
    /// Create a new tokenizer.
    pub fn new(
        vocab: Arc<UnifiedBpeVocab<T>>,
        encoder: Arc<dyn TokenEncoder<T>>,
        decoder: Arc<dyn TokenDecoder<T>>,
    ) -> Self {
        Self {
            vocab,
            encoder,
            decoder,
        }
    }

    /// Load ``encoder.json`` and ``vocab.bpe`` from a directory,
    /// and build a tokenizer over them.
    pub fn from_dir<P: AsRef<Path>>(
        dir: P,
        options: TokenizerOptions,
    ) -> BpeResult<Arc<Self>> {
        let vocab: UnifiedBpeVocab<T> = load_datagym_dir(dir)?;
        options.build(Arc::new(vocab))
    }

    /// Get the underlying vocabulary.
    pub fn vocab(&self) -> &Arc<UnifiedBpeVocab<T>> {
        &self.vocab
    }

    /// Get the underlying encoder.
    pub fn encoder(&self) -> &Arc<dyn TokenEncoder<T>> {
        &self.encoder
    }

    /// Get the underlying decoder.
    pub fn decoder(&self) -> &Arc<dyn TokenDecoder<T>> {
        &self.decoder
    }
}

impl<T: TokenType> TokenEncoder<T> for Tokenizer<T> {
    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> BpeResult<()> {
        self.encoder.try_encode_append(text, tokens)
    }

    fn try_encode(
        &self,
        text: &str,
    ) -> BpeResult<Vec<T>> {
        self.encoder.try_encode(text)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> BpeResult<Vec<Vec<T>>> {
        self.encoder.try_encode_batch(batch)
    }
}

impl<T: TokenType> TokenDecoder<T> for Tokenizer<T> {
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> BpeResult<()> {
        self.decoder.try_decode_append(tokens, buf)
    }

    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> BpeResult<Vec<Vec<u8>>> {
        self.decoder.try_decode_batch_to_bytes(batch)
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> BpeResult<Vec<String>> {
        self.decoder.try_decode_batch_to_strings(batch)
    }
}
