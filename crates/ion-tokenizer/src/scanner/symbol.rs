//! Plain, quoted, and operator symbol scanners.

use super::{is_operator_char, is_symbol_continue, peek2, string};
use crate::decoder::CharDecoder;
use crate::error::ErrorKind;
use crate::escape::EscapeDecoder;
use crate::options::TokenizerOptions;
use crate::token::{Token, TokenKind};

/// `start` is the byte offset of the already-consumed leading symbol
/// character.
pub(crate) fn scan_plain_symbol(decoder: &mut CharDecoder, start: usize) -> Result<Token, ErrorKind> {
    loop {
        match decoder.read_char()? {
            Some(c) if is_symbol_continue(c) => continue,
            Some(_) => {
                decoder.unread();
                break;
            }
            None => break,
        }
    }
    Ok(Token::new(TokenKind::SymbolBasic, start, decoder.position()))
}

/// `start` is the byte offset of the already-consumed opening `'`.
pub(crate) fn scan_quoted_symbol(
    decoder: &mut CharDecoder,
    start: usize,
    options: &TokenizerOptions,
) -> Result<Token, ErrorKind> {
    if matches!(decoder.read_char()?, Some('\'')) {
        // `''` seen: either an empty quoted symbol (`''`, immediately
        // followed by something other than a third `'`) or the opening of
        // a long string (`'''`).
        if matches!(decoder.read_char()?, Some('\'')) {
            return string::scan_long_string(decoder, start, options);
        }
        decoder.unread();
        return Ok(Token::new(TokenKind::SymbolQuoted, start, decoder.position()));
    }
    decoder.unread();

    let mut escapes = EscapeDecoder::new();
    loop {
        let Some(c) = decoder.read_char()? else {
            return Err(ErrorKind::UnexpectedEof);
        };
        match c {
            '\'' => break,
            '\n' => return Err(ErrorKind::BadToken(Some('\n'))),
            '\\' => {
                escapes.decode(decoder, options)?;
            }
            _ => {}
        }
    }
    Ok(Token::new(TokenKind::SymbolQuoted, start, decoder.position()))
}

/// `start` is the byte offset of the already-consumed leading operator
/// character (`+`, `-`, or one of the other operator-symbol characters).
pub(crate) fn scan_operator_symbol(
    decoder: &mut CharDecoder,
    start: usize,
    options: &TokenizerOptions,
) -> Result<Token, ErrorKind> {
    let leading = decoder.get_byte(start).map(|b| b as char);
    if matches!(leading, Some('+') | Some('-')) {
        if let Some(tok) = try_scan_signed_inf(decoder, start)? {
            return Ok(tok);
        }
    }
    let _ = options;

    loop {
        match decoder.read_char()? {
            Some(c) if is_operator_char(c) => continue,
            Some(_) => {
                decoder.unread();
                break;
            }
            None => break,
        }
    }
    Ok(Token::new(
        TokenKind::SymbolOperator,
        start,
        decoder.position(),
    ))
}

/// After a leading `+`/`-`, peeks for a literal `inf` followed by a
/// non-identifier character; if found, consumes it and returns a `FLOAT`
/// token covering e.g. `+inf`. Otherwise leaves the decoder untouched.
fn try_scan_signed_inf(
    decoder: &mut CharDecoder,
    start: usize,
) -> Result<Option<Token>, ErrorKind> {
    let (c1, c2) = peek2(decoder)?;
    if c1 != Some('i') || c2 != Some('n') {
        return Ok(None);
    }
    // Consume `i`, `n`; then check `f` followed by a non-identifier char.
    decoder.read_char()?;
    decoder.read_char()?;
    let third = decoder.read_char()?;
    if third != Some('f') {
        // Not actually `inf`; undo whatever the `f` check consumed (nothing
        // at EOF) plus the `i`, `n` consumed above.
        if third.is_some() {
            decoder.unread();
        }
        decoder.unread();
        decoder.unread();
        return Ok(None);
    }
    match decoder.read_char()? {
        Some(c) if is_symbol_continue(c) => {
            // e.g. `+infinity` is not `+inf` followed by a terminator;
            // undo everything and fall back to operator-symbol scanning.
            decoder.unread();
            decoder.unread();
            decoder.unread();
            decoder.unread();
            Ok(None)
        }
        Some(_) => {
            decoder.unread();
            Ok(Some(Token::new(TokenKind::Float, start, decoder.position())))
        }
        None => Ok(Some(Token::new(TokenKind::Float, start, decoder.position()))),
    }
}
