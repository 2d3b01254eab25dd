//! # Unified BPE Vocabulary

use crate::{
    errors::BpeResult,
    regex::{GPT2_PATTERN, RegexWrapperPattern},
    types::TokenType,
    vocab::{MergeRankTable, Vocabulary},
};

/// Everything needed to run a GPT-2 style tokenizer.
///
/// * `pattern` - the chunk split pattern.
/// * `vocabulary` - the ``{ String <-> T }`` token map.
/// * `ranks` - the ``{ (String, String) -> rank }`` merge table.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedBpeVocab<T: TokenType> {
    pattern: RegexWrapperPattern,
    vocabulary: Vocabulary<T>,
    ranks: MergeRankTable,
}

impl<T: TokenType> UnifiedBpeVocab<T> {
    /// Build a unified vocab using [`GPT2_PATTERN`].
    pub fn new(
        vocabulary: Vocabulary<T>,
        ranks: MergeRankTable,
    ) -> Self {
        Self::init(GPT2_PATTERN, vocabulary, ranks)
    }

    /// Build a unified vocab with an explicit split pattern.
    pub fn init<P>(
        pattern: P,
        vocabulary: Vocabulary<T>,
        ranks: MergeRankTable,
    ) -> Self
    where
        P: Into<RegexWrapperPattern>,
    {
        log::debug!(
            "unified vocab: {} tokens, {} merges",
            vocabulary.len(),
            ranks.len()
        );
        Self {
            pattern: pattern.into(),
            vocabulary,
            ranks,
        }
    }

    /// Replace the split pattern.
    pub fn with_pattern<P>(
        self,
        pattern: P,
    ) -> Self
    where
        P: Into<RegexWrapperPattern>,
    {
        Self {
            pattern: pattern.into(),
            ..self
        }
    }

    /// The chunk split pattern.
    pub fn pattern(&self) -> &RegexWrapperPattern {
        &self.pattern
    }

    /// The token vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary<T> {
        &self.vocabulary
    }

    /// The merge rank table.
    pub fn ranks(&self) -> &MergeRankTable {
        &self.ranks
    }

    /// Convert to a different token type.
    pub fn to_token_type<G: TokenType>(&self) -> BpeResult<UnifiedBpeVocab<G>> {
        Ok(UnifiedBpeVocab {
            pattern: self.pattern.clone(),
            vocabulary: self.vocabulary.to_token_type()?,
            ranks: self.ranks.clone(),
        })
    }
}

impl<T: TokenType> AsRef<UnifiedBpeVocab<T>> for UnifiedBpeVocab<T> {
    fn as_ref(&self) -> &UnifiedBpeVocab<T> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unified_vocab() {
        let vocabulary = Vocabulary::<u32>::from_entries([("a", 0), ("b", 1), ("ab", 2)]).unwrap();
        let ranks = MergeRankTable::from_merges([("a", "b")]).unwrap();

        let vocab = UnifiedBpeVocab::new(vocabulary.clone(), ranks.clone());
        assert_eq!(vocab.pattern(), &RegexWrapperPattern::from(GPT2_PATTERN));
        assert_eq!(vocab.vocabulary(), &vocabulary);
        assert_eq!(vocab.ranks(), &ranks);

        let vocab = vocab.with_pattern(r"\w+");
        assert_eq!(vocab.pattern().as_str(), r"\w+");

        let small: UnifiedBpeVocab<u16> = vocab.to_token_type().unwrap();
        assert_eq!(small.vocabulary().lookup_token("ab"), Some(2));
        assert_eq!(small.pattern(), vocab.pattern());
    }
}
