//! # Merge-Rank Table ``{ (Symbol, Symbol) -> rank }``

use crate::{
    errors::{BpeError, BpeResult},
    types::{SymbolPair, WCHashMap, WCHashSet},
};

/// Rank of a merge rule; lower merges earlier.
pub type MergeRank = u32;

/// Ordered table of merge rules.
///
/// Each ``(left, right)`` pair has a unique rank. The table is read-only
/// once built and is shared across every reduction.
///
/// Lookups borrow both symbols; the table is stored as a nested
/// ``left -> right -> rank`` map so no key needs to be allocated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeRankTable {
    ranks: WCHashMap<String, WCHashMap<String, MergeRank>>,
    len: usize,
}

impl MergeRankTable {
    /// Build a table from merges listed in priority order.
    ///
    /// The first listed merge has rank 0.
    ///
    /// ## Returns
    /// [`BpeError::VocabConflict`] if a pair is listed twice.
    pub fn from_merges<I, S>(merges: I) -> BpeResult<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (idx, (left, right)) in merges.into_iter().enumerate() {
            let rank = MergeRank::try_from(idx).map_err(|_| BpeError::TokenOutOfRange)?;
            table.insert(left.into(), right.into(), rank)?;
        }
        Ok(table)
    }

    /// Build a table from explicitly ranked pairs.
    ///
    /// ## Returns
    /// [`BpeError::VocabConflict`] on a duplicate pair or a duplicate rank.
    pub fn from_ranked_pairs<I, S>(pairs: I) -> BpeResult<Self>
    where
        I: IntoIterator<Item = ((S, S), MergeRank)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        let mut seen: WCHashSet<MergeRank> = Default::default();
        for ((left, right), rank) in pairs {
            if !seen.insert(rank) {
                return Err(BpeError::VocabConflict(format!(
                    "merge rank {rank} is assigned to more than one pair"
                )));
            }
            table.insert(left.into(), right.into(), rank)?;
        }
        Ok(table)
    }

    fn insert(
        &mut self,
        left: String,
        right: String,
        rank: MergeRank,
    ) -> BpeResult<()> {
        let rights = self.ranks.entry(left).or_default();
        if rights.contains_key(&right) {
            return Err(BpeError::VocabConflict(format!(
                "duplicate merge rule for right symbol {right:?}"
            )));
        }
        rights.insert(right, rank);
        self.len += 1;
        Ok(())
    }

    /// Number of merge rules.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Look up the rank of an adjacent pair.
    #[inline(always)]
    pub fn rank(
        &self,
        left: &str,
        right: &str,
    ) -> Option<MergeRank> {
        self.ranks.get(left)?.get(right).copied()
    }

    /// All ``(pair, rank)`` entries, sorted by rank.
    pub fn sorted_pairs(&self) -> Vec<(SymbolPair, MergeRank)> {
        let mut pairs: Vec<(SymbolPair, MergeRank)> = self
            .ranks
            .iter()
            .flat_map(|(left, rights)| {
                rights
                    .iter()
                    .map(move |(right, &rank)| ((left.clone(), right.clone()), rank))
            })
            .collect();
        pairs.sort_by_key(|(_, rank)| *rank);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_merges() {
        let table = MergeRankTable::from_merges([("h", "e"), ("l", "l"), ("he", "ll")]).unwrap();

        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert_eq!(table.rank("h", "e"), Some(0));
        assert_eq!(table.rank("l", "l"), Some(1));
        assert_eq!(table.rank("he", "ll"), Some(2));
        assert_eq!(table.rank("e", "h"), None);
        assert_eq!(table.rank("x", "y"), None);

        assert_eq!(
            table.sorted_pairs(),
            vec![
                (("h".to_string(), "e".to_string()), 0),
                (("l".to_string(), "l".to_string()), 1),
                (("he".to_string(), "ll".to_string()), 2),
            ]
        );
    }

    #[test]
    fn test_from_ranked_pairs() {
        let table =
            MergeRankTable::from_ranked_pairs([(("a", "b"), 10), (("b", "c"), 3)]).unwrap();
        assert_eq!(table.rank("a", "b"), Some(10));
        assert_eq!(table.rank("b", "c"), Some(3));
        assert_eq!(table.sorted_pairs()[0].1, 3);
    }

    #[test]
    fn test_duplicate_pair() {
        assert!(matches!(
            MergeRankTable::from_merges([("a", "b"), ("a", "b")]),
            Err(BpeError::VocabConflict(_))
        ));
    }

    #[test]
    fn test_duplicate_rank() {
        assert!(matches!(
            MergeRankTable::from_ranked_pairs([(("a", "b"), 1), (("c", "d"), 1)]),
            Err(BpeError::VocabConflict(_))
        ));
    }

    #[test]
    fn test_empty() {
        let table = MergeRankTable::default();
        assert!(table.is_empty());
        assert_eq!(table.rank("a", "b"), None);
    }
}
