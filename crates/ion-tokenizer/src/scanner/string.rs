//! Short (`"..."`) and long (`'''...'''`) string scanners.
//!
//! Both choose a clob vs. UTF-8 kind by scanning the full content: if every
//! code point is `\u{00}..=\u{FF}` and no `\u`/`\U` escape was used, the
//! string is clob-compatible (the `\xHH`-above-ASCII quirk is honored via
//! [`TokenizerOptions::xhh_escape_preserves_clob_kind`]).

use crate::decoder::CharDecoder;
use crate::error::ErrorKind;
use crate::escape::{Escape, EscapeDecoder};
use crate::options::TokenizerOptions;
use crate::token::{Token, TokenKind};

/// `start` is the byte offset of the already-consumed opening `"`.
pub(crate) fn scan_short_string(
    decoder: &mut CharDecoder,
    start: usize,
    options: &TokenizerOptions,
) -> Result<Token, ErrorKind> {
    let mut escapes = EscapeDecoder::new();
    let mut forced_utf8 = false;
    loop {
        let Some(c) = decoder.read_char()? else {
            return Err(ErrorKind::UnexpectedEof);
        };
        match c {
            '"' => break,
            '\n' => return Err(ErrorKind::BadToken(Some('\n'))),
            '\\' => {
                if record_escape(&mut escapes, decoder, options)? {
                    forced_utf8 = true;
                }
            }
            ch if (ch as u32) > 0xFF => forced_utf8 = true,
            _ => {}
        }
    }
    let kind = if forced_utf8 {
        TokenKind::StringUtf8
    } else {
        TokenKind::StringClob
    };
    Ok(Token::new(kind, start, decoder.position()))
}

/// `start` is the byte offset of the already-consumed opening `'''`.
pub(crate) fn scan_long_string(
    decoder: &mut CharDecoder,
    start: usize,
    options: &TokenizerOptions,
) -> Result<Token, ErrorKind> {
    let mut escapes = EscapeDecoder::new();
    let mut forced_utf8 = false;
    loop {
        let Some(c) = decoder.read_char()? else {
            return Err(ErrorKind::UnexpectedEof);
        };
        match c {
            '\'' => {
                let Some(second) = decoder.read_char()? else {
                    return Err(ErrorKind::UnexpectedEof);
                };
                if second != '\'' {
                    decoder.unread();
                    continue; // a lone `'` is literal content
                }
                let Some(third) = decoder.read_char()? else {
                    return Err(ErrorKind::UnexpectedEof);
                };
                if third == '\'' {
                    break; // closing `'''`
                }
                decoder.unread(); // `''` is literal content
            }
            '\\' => {
                if record_escape(&mut escapes, decoder, options)? {
                    forced_utf8 = true;
                }
            }
            ch if (ch as u32) > 0xFF => forced_utf8 = true,
            _ => {}
        }
    }
    let kind = if forced_utf8 {
        TokenKind::StringUtf8Long
    } else {
        TokenKind::StringClobLong
    };
    Ok(Token::new(kind, start, decoder.position()))
}

/// Decodes one `\`-escape (the backslash already consumed) and reports
/// whether it forces the enclosing string to the UTF-8 kind.
fn record_escape(
    escapes: &mut EscapeDecoder,
    decoder: &mut CharDecoder,
    options: &TokenizerOptions,
) -> Result<bool, ErrorKind> {
    Ok(match escapes.decode(decoder, options)? {
        Escape::UnicodeEscape(_) => true,
        Escape::HexByte(ch) => {
            (ch as u32) > 0x7F && !options.xhh_escape_preserves_clob_kind
        }
        Escape::Char(ch) => (ch as u32) > 0xFF,
        Escape::LineContinuation => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ByteSource;

    fn scan_short(input: &str) -> Token {
        let mut d = CharDecoder::new(ByteSource::new(input.as_bytes().to_vec()));
        d.read_char().unwrap();
        scan_short_string(&mut d, 0, &TokenizerOptions::default()).unwrap()
    }

    #[test]
    fn plain_short_string_is_clob() {
        let t = scan_short("\"hi\"");
        assert_eq!(t.kind, TokenKind::StringClob);
    }

    #[test]
    fn unicode_escape_forces_utf8() {
        let t = scan_short("\"hi\\u00FFthere\"");
        assert_eq!(t.kind, TokenKind::StringUtf8);
    }

    #[test]
    fn raw_high_code_point_forces_utf8() {
        let t = scan_short("\"h\u{e9}llo\"");
        assert_eq!(t.kind, TokenKind::StringUtf8);
    }

    #[test]
    fn xhh_escape_preserves_clob_kind_by_default() {
        let t = scan_short("\"h\\xFFi\"");
        assert_eq!(t.kind, TokenKind::StringClob);
    }

    #[test]
    fn unescaped_newline_is_error() {
        let mut d = CharDecoder::new(ByteSource::new(b"\"a\nb\"".to_vec()));
        d.read_char().unwrap();
        assert!(scan_short_string(&mut d, 0, &TokenizerOptions::default()).is_err());
    }

    #[test]
    fn eof_inside_short_string_is_unexpected_eof() {
        let mut d = CharDecoder::new(ByteSource::new(b"\"abc".to_vec()));
        d.read_char().unwrap();
        assert!(scan_short_string(&mut d, 0, &TokenizerOptions::default()).is_err());
    }

    fn scan_long(input: &str) -> Token {
        let mut d = CharDecoder::new(ByteSource::new(input.as_bytes().to_vec()));
        // consume the opening '''
        d.read_char().unwrap();
        d.read_char().unwrap();
        d.read_char().unwrap();
        scan_long_string(&mut d, 0, &TokenizerOptions::default()).unwrap()
    }

    #[test]
    fn long_string_allows_single_and_double_inner_quotes() {
        let t = scan_long("'''a'b''c'''");
        assert_eq!(t.kind, TokenKind::StringClobLong);
    }

    #[test]
    fn long_string_closes_on_triple_quote() {
        let t = scan_long("'''ab'''");
        assert_eq!(t.kind, TokenKind::StringClobLong);
        assert_eq!(t.end, 8);
    }
}
