//! # Merge Scan Reducer
//!
//! Re-scans for the best available merge,
//! iterates until no more merges remain.

use crate::{
    errors::{BpeError, BpeResult},
    vocab::{MergeRankTable, merge_ranks::MergeRank},
};

/// Find the lowest ranked adjacent pair in `symbols`.
///
/// ## Returns
/// ``Some((rank, idx))`` of the leftmost window holding that pair.
fn lowest_ranked_pair(
    symbols: &[String],
    ranks: &MergeRankTable,
) -> Option<(MergeRank, usize)> {
    symbols
        .windows(2)
        .enumerate()
        .filter_map(|(idx, w)| ranks.rank(&w[0], &w[1]).map(|rank| (rank, idx)))
        .min()
}

/// Fuse every non-overlapping occurrence of ``(symbols[first], symbols[first + 1])``,
/// scanning left to right from `first`.
///
/// The buffer is compacted in place.
fn merge_pair_from(
    symbols: &mut Vec<String>,
    first: usize,
) {
    let left = symbols[first].clone();
    let right = symbols[first + 1].clone();

    // symbols[..write] is the merged prefix; symbols[read..] is unread.
    let mut write = first;
    let mut read = first;
    while read < symbols.len() {
        if read + 1 < symbols.len() && symbols[read] == left && symbols[read + 1] == right {
            let tail = core::mem::take(&mut symbols[read + 1]);
            let mut fused = core::mem::take(&mut symbols[read]);
            fused.push_str(&tail);
            symbols[write] = fused;
            read += 2;
        } else {
            symbols.swap(write, read);
            read += 1;
        }
        write += 1;
    }
    symbols.truncate(write);
}

/// Reduce a symbol sequence under a merge-rank table.
///
/// Each round finds the globally lowest ranked adjacent pair present in
/// `ranks`, then fuses its leftmost occurrence and every later
/// non-overlapping occurrence of the same pair. Rounds repeat until no
/// adjacent pair is ranked.
///
/// Every fusion shortens the buffer by one, so the loop runs at most
/// ``symbols.len() - 1`` fusions.
///
/// ## Returns
/// The reduced symbols, or [`BpeError::EmptyInput`] if `symbols` is empty.
pub fn reduce(
    mut symbols: Vec<String>,
    ranks: &MergeRankTable,
) -> BpeResult<Vec<String>> {
    if symbols.is_empty() {
        return Err(BpeError::EmptyInput);
    }

    while symbols.len() >= 2 {
        match lowest_ranked_pair(&symbols, ranks) {
            Some((_, idx)) => merge_pair_from(&mut symbols, idx),
            None => break,
        }
    }

    Ok(symbols)
}

/// Reduce an encoded chunk, seeded with one symbol per char.
pub fn reduce_chunk(
    chunk: &str,
    ranks: &MergeRankTable,
) -> BpeResult<Vec<String>> {
    reduce(chunk.chars().map(String::from).collect(), ranks)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn syms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn hello_ranks() -> MergeRankTable {
        MergeRankTable::from_ranked_pairs([
            (("h", "e"), 0),
            (("l", "l"), 1),
            (("he", "ll"), 2),
            (("hell", "o"), 3),
        ])
        .unwrap()
    }

    #[test]
    fn test_hello() {
        let ranks = hello_ranks();
        assert_eq!(reduce_chunk("hello", &ranks).unwrap(), syms(&["hello"]));
        assert_eq!(reduce_chunk("hell", &ranks).unwrap(), syms(&["hell"]));
        assert_eq!(reduce_chunk("oh", &ranks).unwrap(), syms(&["o", "h"]));
    }

    #[test]
    fn test_merge_order() {
        let ranks = hello_ranks();

        let mut symbols = syms(&["h", "e", "l", "l", "o"]);
        let mut steps = vec![];
        while let Some((rank, idx)) = lowest_ranked_pair(&symbols, &ranks) {
            steps.push(rank);
            merge_pair_from(&mut symbols, idx);
        }
        assert_eq!(steps, vec![0, 1, 2, 3]);
        assert_eq!(symbols, syms(&["hello"]));
    }

    #[test]
    fn test_global_min_not_leftmost() {
        // ("b", "c") outranks ("a", "b"), even though "ab" is further left.
        let ranks = MergeRankTable::from_merges([("b", "c"), ("a", "b")]).unwrap();
        assert_eq!(reduce_chunk("abc", &ranks).unwrap(), syms(&["a", "bc"]));
    }

    #[test]
    fn test_same_pair_all_occurrences_one_round() {
        let ranks = MergeRankTable::from_merges([("a", "b"), ("ab", "ab")]).unwrap();
        assert_eq!(reduce_chunk("abab", &ranks).unwrap(), syms(&["abab"]));
        assert_eq!(
            reduce_chunk("abxab", &ranks).unwrap(),
            syms(&["ab", "x", "ab"])
        );
    }

    #[test]
    fn test_overlapping_pair_leftmost_first() {
        let ranks = MergeRankTable::from_merges([("a", "a")]).unwrap();
        assert_eq!(reduce_chunk("aaa", &ranks).unwrap(), syms(&["aa", "a"]));
        assert_eq!(reduce_chunk("aaaa", &ranks).unwrap(), syms(&["aa", "aa"]));
    }

    #[test]
    fn test_single_symbol() {
        let ranks = hello_ranks();
        assert_eq!(reduce(syms(&["x"]), &ranks).unwrap(), syms(&["x"]));
    }

    #[test]
    fn test_multibyte_symbols() {
        let ranks = MergeRankTable::from_merges([("\u{0120}", "t"), ("\u{0120}t", "he")]).unwrap();
        assert_eq!(
            reduce(syms(&["\u{0120}", "t", "he"]), &ranks).unwrap(),
            syms(&["\u{0120}the"])
        );
    }

    #[test]
    fn test_empty_input() {
        let ranks = hello_ranks();
        assert!(matches!(reduce(vec![], &ranks), Err(BpeError::EmptyInput)));
        assert!(matches!(
            reduce_chunk("", &ranks),
            Err(BpeError::EmptyInput)
        ));
    }

    /// The direct reading of the algorithm: rebuild the sequence each round.
    fn reference_reduce(
        chunk: &str,
        ranks: &MergeRankTable,
    ) -> Vec<String> {
        let mut tokens: Vec<String> = chunk.chars().map(String::from).collect();
        loop {
            let best = tokens
                .windows(2)
                .filter_map(|w| ranks.rank(&w[0], &w[1]).map(|r| (r, w[0].clone(), w[1].clone())))
                .min();
            let Some((_, a, b)) = best else {
                return tokens;
            };
            let mut next = Vec::with_capacity(tokens.len());
            let mut i = 0;
            while i < tokens.len() {
                if i + 1 < tokens.len() && tokens[i] == a && tokens[i + 1] == b {
                    next.push(format!("{a}{b}"));
                    i += 2;
                } else {
                    next.push(tokens[i].clone());
                    i += 1;
                }
            }
            tokens = next;
        }
    }

    fn arb_ranks() -> impl Strategy<Value = MergeRankTable> {
        let sym = prop::sample::select(vec!["a", "b", "c", "ab", "bc", "ca", "abc", "aa"]);
        prop::collection::vec((sym.clone(), sym), 0..12).prop_map(|pairs| {
            let mut seen = std::collections::HashSet::new();
            let unique: Vec<(&str, &str)> = pairs.into_iter().filter(|p| seen.insert(*p)).collect();
            MergeRankTable::from_merges(unique).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_terminates_and_shrinks(chunk in "[abc]{1,24}", ranks in arb_ranks()) {
            let out = reduce_chunk(&chunk, &ranks).unwrap();
            prop_assert!(!out.is_empty());
            prop_assert!(out.len() <= chunk.len());
            prop_assert_eq!(out.concat(), chunk);
        }

        #[test]
        fn prop_matches_reference(chunk in "[abc]{1,24}", ranks in arb_ranks()) {
            prop_assert_eq!(reduce_chunk(&chunk, &ranks).unwrap(), reference_reduce(&chunk, &ranks));
        }
    }
}
