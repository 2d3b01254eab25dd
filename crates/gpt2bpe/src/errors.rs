//! # Error Types

/// Errors from gpt2bpe operations.
#[derive(Debug, thiserror::Error)]
pub enum BpeError {
    /// A reduction was requested for an empty chunk.
    #[error("cannot reduce an empty chunk")]
    EmptyInput,

    /// A merged symbol has no id in the vocabulary.
    #[error("unknown token: {token:?}")]
    UnknownToken {
        /// The symbol which failed lookup.
        token: String,
    },

    /// A token id has no entry in the vocabulary.
    #[error("unknown token id: {id}")]
    UnknownId {
        /// The id which failed lookup.
        id: u64,
    },

    /// Bytes were not valid UTF-8.
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(#[from] core::str::Utf8Error),

    /// A character is not in the image of the byte/unicode codec.
    #[error("character {ch:?} is not produced by the byte codec")]
    UnmappedChar {
        /// The offending character.
        ch: char,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// Token value out of range for the target type.
    #[error("token out of range")]
    TokenOutOfRange,

    /// Parse error (vocab.bpe lines, ids, etc.)
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Chunk pattern failed to compile (`regex`).
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Chunk pattern failed to compile or run (`fancy_regex`).
    #[error("regex error: {0}")]
    FancyRegex(#[from] fancy_regex::Error),
}

/// Result type for gpt2bpe operations.
pub type BpeResult<T> = core::result::Result<T, BpeError>;
