//! # Vocabulary
//!
//! * [`ByteUnicodeCodec`] - the reversible ``byte <-> char`` map.
//! * [`MergeRankTable`] - ranked ``(left, right)`` merge rules.
//! * [`Vocabulary`] - the ``{ token <-> id }`` map.
//! * [`UnifiedBpeVocab`] - all of the above, plus the split pattern.
//! * [`io`] - loading ``encoder.json`` / ``vocab.bpe``.

pub mod byte_codec;
pub mod io;
pub mod merge_ranks;
pub mod unified_vocab;
pub mod vocabulary;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(inline)]
pub use byte_codec::ByteUnicodeCodec;
#[doc(inline)]
pub use merge_ranks::MergeRankTable;
#[doc(inline)]
pub use unified_vocab::UnifiedBpeVocab;
#[doc(inline)]
pub use vocabulary::Vocabulary;
