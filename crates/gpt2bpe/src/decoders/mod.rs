//! # Token Decoders
//!
//! Decoding is ``id -> token string -> bytes``; the final
//! ``bytes -> String`` step is strict by default.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gpt2bpe::{
//!     BpeResult,
//!     decoders::{DictionaryDecoder, TokenDecoder},
//!     types::TokenType,
//!     vocab::UnifiedBpeVocab,
//! };
//!
//! fn example<T: TokenType>(
//!     vocab: Arc<UnifiedBpeVocab<T>>,
//!     batch: &[&[T]],
//! ) -> BpeResult<Vec<String>> {
//!     let decoder = DictionaryDecoder::from_unified_vocab(vocab);
//!     decoder.try_decode_batch_to_strings(batch)
//! }
//! ```

mod dictionary_decoder;
mod token_decoder;

#[doc(inline)]
pub use dictionary_decoder::*;
#[doc(inline)]
pub use token_decoder::*;
