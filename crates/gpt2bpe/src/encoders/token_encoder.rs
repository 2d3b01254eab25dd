//! # Token Encoder Trait

use std::sync::Arc;

use crate::{
    errors::BpeResult,
    segmentation::text_segmentor::EXPECTED_BYTES_PER_CHUNK,
    types::TokenType,
};

/// A trait for token encoders.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Encode text, appending ids to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `tokens` - The target token buffer to append to.
    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> BpeResult<()>;

    /// Encode text into tokens.
    ///
    /// ## Returns
    /// A `Result` containing the vector of tokens or an error.
    fn try_encode(
        &self,
        text: &str,
    ) -> BpeResult<Vec<T>> {
        let capacity = text.len() as f32 / EXPECTED_BYTES_PER_CHUNK;
        let mut tokens = Vec::with_capacity(capacity as usize);
        self.try_encode_append(text, &mut tokens)?;
        Ok(tokens)
    }

    /// Encode raw bytes which must hold UTF-8 text.
    ///
    /// Malformed input is rejected before pretokenization,
    /// with [`crate::BpeError::InvalidUtf8`].
    fn try_encode_bytes(
        &self,
        bytes: &[u8],
    ) -> BpeResult<Vec<T>> {
        self.try_encode(core::str::from_utf8(bytes)?)
    }

    /// Encode a batch of text into tokens.
    ///
    /// ## Returns
    /// A `Result` containing the vector of token vectors,
    /// or the first error encountered.
    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> BpeResult<Vec<Vec<T>>> {
        batch.iter().map(|s| self.try_encode(s)).collect()
    }
}

impl<T, E> TokenEncoder<T> for Arc<E>
where
    T: TokenType,
    E: TokenEncoder<T> + ?Sized,
{
    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> BpeResult<()> {
        (**self).try_encode_append(text, tokens)
    }

    fn try_encode(
        &self,
        text: &str,
    ) -> BpeResult<Vec<T>> {
        (**self).try_encode(text)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> BpeResult<Vec<Vec<T>>> {
        (**self).try_encode_batch(batch)
    }
}
