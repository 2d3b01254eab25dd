//! # Token Decoder Trait

use std::sync::Arc;

use crate::{errors::BpeResult, types::TokenType};

/// Trait for token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decode tokens, appending the raw bytes to a target buffer.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    /// * `buf` - The target byte buffer to append to.
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> BpeResult<()>;

    /// Decode tokens into bytes.
    ///
    /// The result is not guaranteed to be valid UTF-8;
    /// a token sequence may end inside a multi-byte character.
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> BpeResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(tokens.len() * 4);
        self.try_decode_append(tokens, &mut buf)?;
        Ok(buf)
    }

    /// Decode tokens into a string.
    ///
    /// ## Returns
    /// [`crate::BpeError::InvalidUtf8`] if the decoded bytes are not UTF-8.
    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> BpeResult<String> {
        let buf = self.try_decode_to_bytes(tokens)?;
        match String::from_utf8(buf) {
            Ok(s) => Ok(s),
            Err(err) => Err(err.utf8_error().into()),
        }
    }

    /// Decode tokens into a string, replacing malformed sequences
    /// with ``U+FFFD``.
    fn try_decode_to_string_lossy(
        &self,
        tokens: &[T],
    ) -> BpeResult<String> {
        let buf = self.try_decode_to_bytes(tokens)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Decode a batch of tokens into bytes.
    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> BpeResult<Vec<Vec<u8>>> {
        batch.iter().map(|t| self.try_decode_to_bytes(t)).collect()
    }

    /// Decode a batch of tokens into strings.
    ///
    /// ## Returns
    /// The decoded strings, or the first error encountered.
    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> BpeResult<Vec<String>> {
        batch.iter().map(|t| self.try_decode_to_string(t)).collect()
    }
}

impl<T, D> TokenDecoder<T> for Arc<D>
where
    T: TokenType,
    D: TokenDecoder<T> + ?Sized,
{
    fn try_decode_append(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> BpeResult<()> {
        (**self).try_decode_append(tokens, buf)
    }

    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> BpeResult<Vec<Vec<u8>>> {
        (**self).try_decode_batch_to_bytes(batch)
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> BpeResult<Vec<String>> {
        (**self).try_decode_batch_to_strings(batch)
    }
}
