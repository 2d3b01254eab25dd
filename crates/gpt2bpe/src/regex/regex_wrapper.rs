//! # Regex Wrapper
//!
//! A chunk pattern is labeled with the engine it was written for, and compiles
//! into a [`RegexWrapper`] which hides the engine behind one match iterator.

use std::{borrow::Cow, ops::Range};

use crate::errors::BpeResult;

/// A chunk split pattern, labeled by target engine.
///
/// The text is a [`Cow`] so that built-in patterns can be `const`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RegexWrapperPattern {
    /// Written for the `regex` crate.
    Basic(Cow<'static, str>),

    /// Written for the `fancy_regex` crate (look-around, back-references).
    Fancy(Cow<'static, str>),

    /// Unknown target; `regex` is tried first, then `fancy_regex`.
    Adaptive(Cow<'static, str>),
}

impl From<&str> for RegexWrapperPattern {
    fn from(pattern: &str) -> Self {
        Self::Adaptive(Cow::Owned(pattern.to_string()))
    }
}

impl From<String> for RegexWrapperPattern {
    fn from(pattern: String) -> Self {
        Self::Adaptive(Cow::Owned(pattern))
    }
}

impl RegexWrapperPattern {
    /// The pattern source text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(p) | Self::Fancy(p) | Self::Adaptive(p) => p,
        }
    }

    /// Compile for the labeled engine.
    ///
    /// An `Adaptive` pattern which neither engine accepts reports the
    /// `fancy_regex` error.
    pub fn compile(&self) -> BpeResult<RegexWrapper> {
        let re = match self {
            Self::Basic(p) => RegexWrapper::Basic(regex::Regex::new(p)?),
            Self::Fancy(p) => RegexWrapper::Fancy(fancy_regex::Regex::new(p)?),
            Self::Adaptive(p) => match regex::Regex::new(p) {
                Ok(re) => RegexWrapper::Basic(re),
                Err(_) => RegexWrapper::Fancy(fancy_regex::Regex::new(p)?),
            },
        };
        Ok(re)
    }
}

/// A compiled chunk pattern.
#[derive(Debug, Clone)]
pub enum RegexWrapper {
    /// Compiled by `regex`.
    Basic(regex::Regex),

    /// Compiled by `fancy_regex`.
    Fancy(fancy_regex::Regex),
}

impl RegexWrapper {
    /// Is this `Basic`?
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Basic(_))
    }

    /// Is this `Fancy`?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// The pattern source text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(re) => re.as_str(),
            Self::Fancy(re) => re.as_str(),
        }
    }

    /// Iterate the byte ranges of all non-overlapping matches in `haystack`.
    ///
    /// `fancy_regex` can fail mid-scan (backtrack limits); that surfaces as an
    /// `Err` item.
    pub fn find_iter<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> MatchRanges<'r, 'h> {
        match self {
            Self::Basic(re) => MatchRanges::Basic(re.find_iter(haystack)),
            Self::Fancy(re) => MatchRanges::Fancy(re.find_iter(haystack)),
        }
    }
}

/// Match range iterator returned by [`RegexWrapper::find_iter`].
pub enum MatchRanges<'r, 'h> {
    /// Over `regex::Matches`.
    Basic(regex::Matches<'r, 'h>),

    /// Over `fancy_regex::Matches`.
    Fancy(fancy_regex::Matches<'r, 'h>),
}

impl Iterator for MatchRanges<'_, '_> {
    type Item = BpeResult<Range<usize>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Basic(it) => it.next().map(|m| Ok(m.range())),
            Self::Fancy(it) => it.next().map(|m| Ok(m?.range())),
        }
    }
}
