//! # `gpt2bpe` Byte-Level BPE Tokenizer
//!
//! A reversible GPT-2 tokenizer: text to integer ids and back,
//! using a fixed vocabulary (``encoder.json``) and an ordered
//! table of merge rules (``vocab.bpe``).
//!
//! See:
//! * [`encoders`] to encode text into tokens.
//! * [`decoders`] to decode tokens into text.
//! * [`vocab`] to manage vocabularies and vocab io.
//! * [`tokenizer`] for the combined [`Tokenizer`] and its [`TokenizerOptions`].
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::WCHash{*}`` type alias machinery.
//!
//! #### feature: ``foldhash``
//!
//! As ``ahash``, but with ``foldhash``. If both are enabled, ``ahash`` wins.
//!
//! #### feature: ``rayon``
//!
//! This enables batch parallelism wrappers using the ``rayon`` crate;
//! selected by [`TokenizerOptions::with_parallel`].
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! #### feature: ``testing``
//!
//! Exports the [`vocab::testing`] vocabulary builders.
//!
//! ## Encoding And Decoding
//!
//! ```rust,no_run
//! use gpt2bpe::{TokenDecoder, TokenEncoder, Tokenizer, TokenizerOptions};
//!
//! fn example() -> gpt2bpe::BpeResult<()> {
//!     let options = TokenizerOptions::default()
//!         .with_cache_capacity(8192)
//!         .with_parallel(true);
//!     let tokenizer = Tokenizer::<u32>::from_dir("models/gpt2", options)?;
//!
//!     let batch = tokenizer.try_encode_batch(&["Hello world", "it's the salt"])?;
//!     let refs: Vec<&[u32]> = batch.iter().map(Vec::as_slice).collect();
//!     let texts = tokenizer.try_decode_batch_to_strings(&refs)?;
//!     assert_eq!(texts, ["Hello world", "it's the salt"]);
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "rayon")]
pub mod rayon;

pub mod concurrency;
pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod regex;
pub mod segmentation;
pub mod tokenizer;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use decoders::TokenDecoder;
#[doc(inline)]
pub use encoders::TokenEncoder;
#[doc(inline)]
pub use errors::{BpeError, BpeResult};
#[doc(inline)]
pub use tokenizer::{Tokenizer, TokenizerOptions};
#[doc(inline)]
pub use types::TokenType;
#[doc(inline)]
pub use vocab::UnifiedBpeVocab;
