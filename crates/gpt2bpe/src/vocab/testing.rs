//! # Test Vocabularies

use crate::{
    types::TokenType,
    vocab::{ByteUnicodeCodec, MergeRankTable, UnifiedBpeVocab, Vocabulary},
};

/// The merge rules of [`build_test_vocab`], in rank order.
///
/// Symbols are in byte/unicode encoded form; ``\u{0120}`` is the space byte.
pub const TEST_MERGES: &[(&str, &str)] = &[
    ("h", "e"),
    ("l", "l"),
    ("t", "h"),
    ("a", "t"),
    ("he", "ll"),
    ("hell", "o"),
    ("th", "e"),
    ("at", "e"),
    ("o", "n"),
    ("w", "o"),
    ("l", "d"),
    ("r", "ld"),
    ("wo", "rld"),
    ("f", "o"),
    ("fo", "r"),
    ("a", "ll"),
    ("\u{0120}", "the"),
    ("\u{0120}", "hello"),
    ("\u{0120}", "world"),
    ("\u{0120}", "c"),
    ("\u{0120}c", "at"),
    ("\u{0120}", "\u{0120}"),
];

/// Build a small vocabulary for tests.
///
/// Ids ``0..256`` are the single-byte symbols, in byte order;
/// each merge's fused symbol follows, in rank order.
/// Every text is encodable with it.
///
/// ## Panics
/// If `T` cannot hold the ids.
pub fn build_test_vocab<T: TokenType>() -> UnifiedBpeVocab<T> {
    let codec = ByteUnicodeCodec::default();

    let mut entries: Vec<(String, usize)> = codec
        .byte_chars()
        .iter()
        .enumerate()
        .map(|(idx, ch)| (ch.to_string(), idx))
        .collect();
    for (left, right) in TEST_MERGES {
        entries.push((format!("{left}{right}"), entries.len()));
    }

    let vocabulary = Vocabulary::from_usize_entries(entries).unwrap();
    let ranks = MergeRankTable::from_merges(TEST_MERGES.iter().copied()).unwrap();
    UnifiedBpeVocab::new(vocabulary, ranks)
}

/// Build the minimal ``hello`` vocabulary.
///
/// ``{h:0, e:1, l:2, o:3, he:4, ll:5, hell:6, hello:7}``, with merges
/// ``h e``, ``l l``, ``he ll``, ``hell o``. No other text is encodable.
///
/// ## Panics
/// If `T` cannot hold the ids.
pub fn build_hello_vocab<T: TokenType>() -> UnifiedBpeVocab<T> {
    let vocabulary = Vocabulary::from_usize_entries([
        ("h", 0),
        ("e", 1),
        ("l", 2),
        ("o", 3),
        ("he", 4),
        ("ll", 5),
        ("hell", 6),
        ("hello", 7),
    ])
    .unwrap();
    let ranks = MergeRankTable::from_merges([("h", "e"), ("l", "l"), ("he", "ll"), ("hell", "o")])
        .unwrap();
    UnifiedBpeVocab::new(vocabulary, ranks)
}
