//! # Text Segmentation
//!
//! Pretokenization: [`TextSegmentor`] splits text into chunks with the
//! vocabulary's split pattern (see [`crate::regex::GPT2_PATTERN`]).
//! Each chunk is reduced independently.

pub mod text_segmentor;

#[doc(inline)]
pub use text_segmentor::{SpanRef, TextSegmentor};
