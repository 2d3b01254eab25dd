//! # Pretokenization Patterns

use std::borrow::Cow;

use crate::regex::RegexWrapperPattern;

/// Concatenate pattern literals with the regex alternation separator `"|"`.
///
/// ```rust
/// use gpt2bpe::join_patterns;
///
/// assert_eq!(join_patterns!("a", "b", "c"), "a|b|c");
/// assert_eq!(join_patterns!("only"), "only");
/// ```
#[macro_export]
macro_rules! join_patterns {
    ($first:literal $(, $rest:literal)* $(,)?) => {
        concat!($first $(, "|", $rest)*)
    };
}

/// The GPT-2 ("`r50k_base`") chunk split pattern.
///
/// Alternatives are tried in order:
/// contractions, letter runs, digit runs, other-symbol runs
/// (each optionally prefixed by one space), whitespace not followed by
/// non-space, and any remaining whitespace.
///
/// The negative look-ahead requires [`fancy_regex`].
pub const GPT2_PATTERN: RegexWrapperPattern = RegexWrapperPattern::Fancy(Cow::Borrowed(join_patterns!(
    r"'s",
    r"'t",
    r"'re",
    r"'ve",
    r"'m",
    r"'ll",
    r"'d",
    r" ?\p{L}+",
    r" ?\p{N}+",
    r" ?[^\s\p{L}\p{N}]+",
    r"\s+(?!\S)",
    r"\s+",
)));

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_gpt2_pattern_compiles() {
        let re = GPT2_PATTERN.compile().unwrap();
        assert!(re.is_fancy());
        assert_eq!(
            GPT2_PATTERN.as_str(),
            r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+"
        );
    }
}
