//! # Vocabulary IO
//!
//! ## Loading A Vocab
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gpt2bpe::{
//!     tokenizer::{Tokenizer, TokenizerOptions},
//!     vocab::{UnifiedBpeVocab, io::load_datagym_dir},
//! };
//!
//! fn example() -> gpt2bpe::BpeResult<Arc<Tokenizer<u32>>> {
//!     let vocab: UnifiedBpeVocab<u32> = load_datagym_dir("tokenizer/")?;
//!     TokenizerOptions::default().build(Arc::new(vocab))
//! }
//! ```

mod datagym;

#[doc(inline)]
pub use datagym::*;
