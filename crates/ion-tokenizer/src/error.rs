//! The tokenizer's error taxonomy.
//!
//! An outer positioned wrapper (line/column) around an inner
//! `#[derive(Error)]` enum of syntax problems.

use thiserror::Error;

/// A lexical error, positioned at the line/column where it was detected.
///
/// All tokenizer errors are fatal to the current token: the tokenizer does
/// not attempt to recover automatically. `EOF` is not represented here — a
/// well-formed end of input is the `EOF` token, not an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct TokenizerError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// 1-based line number.
    pub line: usize,
    /// 0-based column offset within `line`.
    pub column: usize,
}

impl TokenizerError {
    /// Builds a positioned error from a kind and the decoder's current
    /// line/column counters.
    #[must_use]
    pub fn new(kind: ErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}

/// The closed set of ways a tokenizer operation can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed UTF-8 sequence or bad continuation byte.
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
    /// Unrecognized character where a token must begin.
    #[error("unexpected character '{0}' at start of token")]
    BadTokenStart(char),
    /// Syntactically invalid content inside a token (leading-zero
    /// violation, bad month/day, non-terminator after number, bad
    /// exponent, bad base-64 length). Carries the offending character when
    /// one is available.
    #[error("invalid token content (near {0:?})")]
    BadToken(Option<char>),
    /// Unknown `\`-escape or bad hex escape digits.
    #[error("invalid escape sequence")]
    BadEscape,
    /// End of input within a quoted symbol, string, long-string, or
    /// mid-token.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// The token queue was asked to hold more lookahead than its fixed
    /// capacity allows. Never observable from well-formed usage.
    #[error("token queue overflow")]
    QueueOverflow,
    /// The token queue was dequeued while empty. Never observable from
    /// well-formed usage.
    #[error("token queue underflow")]
    QueueUnderflow,
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, TokenizerError};

    #[test]
    fn display_includes_position() {
        let err = TokenizerError::new(ErrorKind::UnexpectedEof, 3, 7);
        assert_eq!(err.to_string(), "unexpected end of input at 3:7");
    }

    #[test]
    fn bad_token_without_char_formats_none() {
        let err = TokenizerError::new(ErrorKind::BadToken(None), 1, 0);
        assert_eq!(err.to_string(), "invalid token content (near None) at 1:0");
    }

    #[test]
    fn bad_token_with_char_formats_some() {
        let err = TokenizerError::new(ErrorKind::BadToken(Some('x')), 1, 0);
        assert_eq!(
            err.to_string(),
            "invalid token content (near Some('x')) at 1:0"
        );
    }
}
