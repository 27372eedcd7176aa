//! Per-token-kind scanners and the main dispatch, `fill_queue`.
//!
//! A flat `match`-based dispatch: one arm per leading-character class,
//! falling through to a sub-scanner for multi-character tokens. Each
//! sub-scanner assumes its token's first character has already been
//! consumed from the decoder; it reads forward from there and is
//! responsible for unreading whatever character stopped it.

mod blob;
mod number;
mod punctuation;
mod string;
mod symbol;
mod timestamp;
mod whitespace;

pub(crate) use blob::scan_base64;
pub(crate) use timestamp::is_leap_year;

use crate::decoder::CharDecoder;
use crate::error::ErrorKind;
use crate::options::TokenizerOptions;
use crate::token::{Token, TokenKind};

/// Fills the token queue with exactly one more token by reading from
/// `decoder`, or returns the `EOF` token forever once input is exhausted.
pub(crate) fn next_token(
    decoder: &mut CharDecoder,
    options: &TokenizerOptions,
) -> Result<Token, ErrorKind> {
    whitespace::skip_whitespace_and_comments(decoder)?;

    let start = decoder.position();
    let Some(c) = decoder.read_char()? else {
        return Ok(Token::new(TokenKind::Eof, start, start));
    };

    match c {
        ':' => Ok(punctuation::scan_colon(decoder, start)),
        '{' => Ok(punctuation::scan_open_brace(decoder, start)),
        '}' => Ok(Token::new(TokenKind::CloseBrace, start, decoder.position())),
        '[' => Ok(Token::new(TokenKind::OpenSquare, start, decoder.position())),
        ']' => Ok(Token::new(
            TokenKind::CloseSquare,
            start,
            decoder.position(),
        )),
        '(' => Ok(Token::new(TokenKind::OpenParen, start, decoder.position())),
        ')' => Ok(Token::new(
            TokenKind::CloseParen,
            start,
            decoder.position(),
        )),
        ',' => Ok(Token::new(TokenKind::Comma, start, decoder.position())),
        '.' => Ok(Token::new(TokenKind::Dot, start, decoder.position())),
        '\'' => symbol::scan_quoted_symbol(decoder, start, options),
        '"' => string::scan_short_string(decoder, start, options),
        '-' => {
            if matches!(peek1(decoder)?, Some(d) if d.is_ascii_digit()) {
                number::scan_number(decoder, start, true, options)
            } else {
                symbol::scan_operator_symbol(decoder, start, options)
            }
        }
        c if c.is_ascii_digit() => number::scan_number(decoder, start, false, options),
        c if is_symbol_start(c) => symbol::scan_plain_symbol(decoder, start),
        c if is_operator_char(c) => symbol::scan_operator_symbol(decoder, start, options),
        c => Err(ErrorKind::BadTokenStart(c)),
    }
}

/// `[A-Za-z_$]` — the characters a plain (unquoted) symbol may start with.
/// Interior characters additionally allow digits; see `symbol::scan_plain_symbol`.
pub(crate) fn is_symbol_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

pub(crate) fn is_symbol_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// The operator-symbol character set. `/` is included here but handled with
/// extra care at dispatch time, since a leading `/` may start a comment
/// instead of an operator symbol.
pub(crate) fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-'
            | '#'
            | '<'
            | '>'
            | '*'
            | '='
            | '^'
            | '&'
            | '|'
            | '~'
            | ';'
            | '!'
            | '?'
            | '@'
            | '%'
            | '`'
            | '.'
            | '/'
    )
}

/// Reads one character and immediately unreads it.
pub(crate) fn peek1(decoder: &mut CharDecoder) -> Result<Option<char>, ErrorKind> {
    let c = decoder.read_char()?;
    if c.is_some() {
        decoder.unread();
    }
    Ok(c)
}

/// Reads up to two characters and immediately unreads them, returning
/// `(first, second)`.
pub(crate) fn peek2(
    decoder: &mut CharDecoder,
) -> Result<(Option<char>, Option<char>), ErrorKind> {
    let Some(first) = decoder.read_char()? else {
        return Ok((None, None));
    };
    let second = decoder.read_char()?;
    if second.is_some() {
        decoder.unread();
    }
    decoder.unread();
    Ok((Some(first), second))
}

/// Whether `c` may legally follow a scalar literal (a number, keyword, or
/// similar unquoted value).
///
/// `/` only terminates when it begins a comment (`//` or `/*`); a bare `/`
/// is itself an operator-symbol character and would otherwise continue an
/// (invalid, mis-terminated) token.
pub(crate) fn is_value_terminator(
    c: Option<char>,
    decoder: &mut CharDecoder,
) -> Result<bool, ErrorKind> {
    let Some(c) = c else {
        return Ok(true);
    };
    Ok(match c {
        ' ' | '\t' | '\n' => true,
        '{' | '}' | '[' | ']' | '(' | ')' | ',' | '"' | '\'' | ':' => true,
        '/' => matches!(peek1(decoder)?, Some('/') | Some('*')),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ByteSource;

    fn decoder(s: &str) -> CharDecoder {
        CharDecoder::new(ByteSource::new(s.as_bytes().to_vec()))
    }

    #[test]
    fn peek1_does_not_consume() {
        let mut d = decoder("ab");
        assert_eq!(peek1(&mut d).unwrap(), Some('a'));
        assert_eq!(d.read_char().unwrap(), Some('a'));
    }

    #[test]
    fn peek2_does_not_consume_either_char() {
        let mut d = decoder("ab");
        assert_eq!(peek2(&mut d).unwrap(), (Some('a'), Some('b')));
        assert_eq!(d.read_char().unwrap(), Some('a'));
        assert_eq!(d.read_char().unwrap(), Some('b'));
    }

    #[test]
    fn eof_is_a_value_terminator() {
        let mut d = decoder("");
        assert!(is_value_terminator(None, &mut d).unwrap());
    }

    #[test]
    fn bare_slash_is_not_a_value_terminator() {
        let mut d = decoder("/x");
        assert!(!is_value_terminator(Some('/'), &mut d).unwrap());
    }

    #[test]
    fn slash_slash_comment_start_is_a_value_terminator() {
        let mut d = decoder("//x");
        assert!(is_value_terminator(Some('/'), &mut d).unwrap());
    }
}
