//! Base-64 blob body scanning, invoked explicitly by the parser after it
//! has recognized an `OPEN_DOUBLE_BRACE` and decided the content is a blob
//! rather than a quoted clob.

use crate::decoder::CharDecoder;
use crate::error::ErrorKind;
use crate::token::{Token, TokenKind};

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

/// Skips leading whitespace, then scans `[A-Za-z0-9+/]*` followed by up to
/// 3 `=` padding bytes. The total scanned length (payload + padding) must
/// be a multiple of 4.
pub(crate) fn scan_base64(decoder: &mut CharDecoder) -> Result<Token, ErrorKind> {
    loop {
        match decoder.read_char()? {
            Some(' ' | '\t' | '\n') => continue,
            Some(_) => {
                decoder.unread();
                break;
            }
            None => break,
        }
    }

    let start = decoder.position();
    let mut len = 0usize;
    loop {
        match decoder.read_char()? {
            Some(c) if is_base64_char(c) => len += 1,
            Some(_) => {
                decoder.unread();
                break;
            }
            None => break,
        }
    }

    let mut padding = 0usize;
    loop {
        if padding >= 3 {
            break;
        }
        match decoder.read_char()? {
            Some('=') => {
                padding += 1;
                len += 1;
            }
            Some(c) => {
                if !c.is_ascii() {
                    return Err(ErrorKind::BadToken(Some(c)));
                }
                decoder.unread();
                break;
            }
            None => break,
        }
    }

    if len % 4 != 0 {
        return Err(ErrorKind::BadToken(None));
    }

    Ok(Token::new(TokenKind::Blob, start, decoder.position()))
}
