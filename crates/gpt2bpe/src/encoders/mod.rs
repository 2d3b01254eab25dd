//! # Token Encoders
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gpt2bpe::{
//!     BpeResult,
//!     encoders::{BpeTokenEncoder, TokenEncoder},
//!     types::TokenType,
//!     vocab::UnifiedBpeVocab,
//! };
//!
//! fn example<T: TokenType>(
//!     vocab: Arc<UnifiedBpeVocab<T>>,
//!     batch: &[&str],
//! ) -> BpeResult<Vec<Vec<T>>> {
//!     let encoder = BpeTokenEncoder::new(vocab, 4096, None)?;
//!     encoder.try_encode_batch(batch)
//! }
//! ```

mod bpe_encoder;
pub mod merge_scan;
pub mod reduction_cache;
mod token_encoder;

#[doc(inline)]
pub use bpe_encoder::*;
#[doc(inline)]
pub use merge_scan::{reduce, reduce_chunk};
#[doc(inline)]
pub use reduction_cache::ReductionCache;
#[doc(inline)]
pub use token_encoder::*;
