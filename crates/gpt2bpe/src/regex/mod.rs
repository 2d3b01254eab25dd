//! # Regex Utilities
//!
//! The GPT-2 chunk split pattern requires look-ahead, which is provided by
//! the [`fancy_regex`] crate; but naturally, this has performance costs.
//! Custom patterns which do not need it fall back on the standard [`regex`] crate.
//!
//! * Labeling Patterns - [`RegexWrapperPattern`]
//!   * [`RegexWrapperPattern::Basic`] - a pattern which was written for [`regex`].
//!   * [`RegexWrapperPattern::Fancy`] - a pattern which was written for [`fancy_regex`].
//!   * [`RegexWrapperPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]

pub mod patterns;
pub mod regex_wrapper;

#[doc(inline)]
pub use patterns::GPT2_PATTERN;
#[doc(inline)]
pub use regex_wrapper::{MatchRanges, RegexWrapper, RegexWrapperPattern};
