//! # Token Vocabulary ``{ String <-> T }``

use crate::{
    errors::{BpeError, BpeResult},
    types::{TokenType, WCHashMap},
};

/// Bijective map between token strings and token ids.
///
/// Token strings are in their byte/unicode encoded form
/// (see [`crate::vocab::ByteUnicodeCodec`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary<T: TokenType> {
    token_ids: WCHashMap<String, T>,
    id_tokens: WCHashMap<T, String>,
}

impl<T: TokenType> Default for Vocabulary<T> {
    fn default() -> Self {
        Self {
            token_ids: Default::default(),
            id_tokens: Default::default(),
        }
    }
}

impl<T: TokenType> Vocabulary<T> {
    /// Build a vocabulary from ``(token, id)`` entries.
    ///
    /// ## Returns
    /// [`BpeError::VocabConflict`] if a token or id occurs twice.
    pub fn from_entries<I, S>(entries: I) -> BpeResult<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        let entries = entries.into_iter();
        let mut vocab = Self::default();
        vocab.token_ids.reserve(entries.size_hint().0);
        vocab.id_tokens.reserve(entries.size_hint().0);

        for (token, id) in entries {
            let token = token.into();
            if let Some(prev) = vocab.id_tokens.get(&id) {
                return Err(BpeError::VocabConflict(format!(
                    "id {id} is assigned to both {prev:?} and {token:?}"
                )));
            }
            if vocab.token_ids.contains_key(&token) {
                return Err(BpeError::VocabConflict(format!(
                    "token {token:?} is listed twice"
                )));
            }
            vocab.id_tokens.insert(id, token.clone());
            vocab.token_ids.insert(token, id);
        }
        Ok(vocab)
    }

    /// Build a vocabulary from ``usize`` ids, converting to `T`.
    ///
    /// ## Returns
    /// [`BpeError::TokenOutOfRange`] if an id does not fit in `T`.
    pub fn from_usize_entries<I, S>(entries: I) -> BpeResult<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(s, id)| T::from_usize(id).map(|t| (s, t)))
            .collect::<Option<Vec<_>>>()
            .ok_or(BpeError::TokenOutOfRange)?;
        Self::from_entries(entries)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }

    /// The largest id, if any.
    pub fn max_token(&self) -> Option<T> {
        self.id_tokens.keys().copied().max()
    }

    /// Look up the id of a token string.
    #[inline(always)]
    pub fn lookup_token(
        &self,
        token: &str,
    ) -> Option<T> {
        self.token_ids.get(token).copied()
    }

    /// Look up the token string of an id.
    #[inline(always)]
    pub fn lookup_id(
        &self,
        id: T,
    ) -> Option<&str> {
        self.id_tokens.get(&id).map(String::as_str)
    }

    /// Look up the id of a token, or fail with [`BpeError::UnknownToken`].
    pub fn try_token_id(
        &self,
        token: &str,
    ) -> BpeResult<T> {
        self.lookup_token(token)
            .ok_or_else(|| BpeError::UnknownToken {
                token: token.to_string(),
            })
    }

    /// Look up the token of an id, or fail with [`BpeError::UnknownId`].
    pub fn try_id_token(
        &self,
        id: T,
    ) -> BpeResult<&str> {
        self.lookup_id(id).ok_or_else(|| BpeError::UnknownId {
            id: id.to_u64().unwrap_or(u64::MAX),
        })
    }

    /// Iterate over ``(token, id)`` entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> {
        self.token_ids.iter().map(|(s, &t)| (s.as_str(), t))
    }

    /// Convert to a different token type.
    pub fn to_token_type<G: TokenType>(&self) -> BpeResult<Vocabulary<G>> {
        let entries = self
            .iter()
            .map(|(s, t)| {
                t.to_usize()
                    .and_then(G::from_usize)
                    .map(|g| (s.to_string(), g))
                    .ok_or(BpeError::TokenOutOfRange)
            })
            .collect::<BpeResult<Vec<_>>>()?;
        Vocabulary::from_entries(entries)
    }
}
