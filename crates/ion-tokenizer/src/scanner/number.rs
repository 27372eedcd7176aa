//! Numeric literal scanning: `INT`, `HEX`, `DECIMAL`, `FLOAT`, and the
//! handoff into [`super::timestamp`] when a 4-digit run turns out to be a
//! timestamp year.

use super::{is_value_terminator, peek1, timestamp};
use crate::decoder::CharDecoder;
use crate::error::ErrorKind;
use crate::options::TokenizerOptions;
use crate::token::{Token, TokenKind};

/// `start` is the byte offset of the already-consumed leading character
/// (`leading` itself — either the first digit, or a `-` whose following
/// digit has not yet been consumed).
pub(crate) fn scan_number(
    decoder: &mut CharDecoder,
    start: usize,
    leading: char,
    options: &TokenizerOptions,
) -> Result<Token, ErrorKind> {
    let has_sign = leading == '-';
    let first_digit = if has_sign {
        decoder
            .read_char()?
            .filter(char::is_ascii_digit)
            .ok_or(ErrorKind::BadToken(None))?
    } else {
        leading
    };

    if first_digit == '0' {
        if matches!(peek1(decoder)?, Some('x') | Some('X')) {
            decoder.read_char()?;
            return scan_hex(decoder, start);
        }
    }

    let mut digit_count = 1;
    if first_digit == '0' {
        if matches!(peek1(decoder)?, Some(d) if d.is_ascii_digit()) {
            let bad = decoder.read_char()?;
            return Err(ErrorKind::BadToken(bad));
        }
    } else {
        loop {
            match decoder.read_char()? {
                Some(d) if d.is_ascii_digit() => digit_count += 1,
                Some(_) => {
                    decoder.unread();
                    break;
                }
                None => break,
            }
        }
    }

    let mut kind = TokenKind::Int;
    match peek1(decoder)? {
        Some('.') => {
            decoder.read_char()?;
            kind = TokenKind::Decimal;
            while matches!(peek1(decoder)?, Some(d) if d.is_ascii_digit()) {
                decoder.read_char()?;
            }
        }
        Some('-') | Some('T') => {
            if has_sign || digit_count != 4 {
                return Err(ErrorKind::BadToken(peek1(decoder)?));
            }
            let year: u32 = decoder_digits_as_u32(decoder, start, has_sign)?;
            return timestamp::scan(decoder, start, year, options);
        }
        _ => {}
    }

    match peek1(decoder)? {
        Some('e' | 'E') => {
            decoder.read_char()?;
            consume_exponent(decoder)?;
            kind = TokenKind::Float;
        }
        Some('d' | 'D') => {
            decoder.read_char()?;
            consume_exponent(decoder)?;
            kind = TokenKind::Decimal;
        }
        _ => {}
    }

    finish_with_terminator_check(decoder, start, kind)
}

fn scan_hex(decoder: &mut CharDecoder, start: usize) -> Result<Token, ErrorKind> {
    let mut saw_digit = false;
    loop {
        match decoder.read_char()? {
            Some(d) if d.is_ascii_hexdigit() => saw_digit = true,
            Some(_) => {
                decoder.unread();
                break;
            }
            None => break,
        }
    }
    if !saw_digit {
        return Err(ErrorKind::BadToken(None));
    }
    finish_with_terminator_check(decoder, start, TokenKind::Hex)
}

fn consume_exponent(decoder: &mut CharDecoder) -> Result<(), ErrorKind> {
    if matches!(peek1(decoder)?, Some('+') | Some('-')) {
        decoder.read_char()?;
    }
    let mut saw_digit = false;
    loop {
        match decoder.read_char()? {
            Some(d) if d.is_ascii_digit() => saw_digit = true,
            Some(_) => {
                decoder.unread();
                break;
            }
            None => break,
        }
    }
    if saw_digit {
        Ok(())
    } else {
        Err(ErrorKind::BadToken(None))
    }
}

fn finish_with_terminator_check(
    decoder: &mut CharDecoder,
    start: usize,
    kind: TokenKind,
) -> Result<Token, ErrorKind> {
    let next = peek1(decoder)?;
    if !is_value_terminator(next, decoder)? {
        return Err(ErrorKind::BadToken(next));
    }
    Ok(Token::new(kind, start, decoder.position()))
}

/// Reads back the already-consumed leading digit run as a `u32`, for use as
/// a timestamp year. `start` is the token's start offset; `has_sign` is
/// always `false` here (timestamps never carry a leading sign).
fn decoder_digits_as_u32(
    decoder: &CharDecoder,
    start: usize,
    has_sign: bool,
) -> Result<u32, ErrorKind> {
    debug_assert!(!has_sign);
    let end = decoder.position();
    let mut value: u32 = 0;
    for pos in start..end {
        let byte = decoder.get_byte(pos).ok_or(ErrorKind::UnexpectedEof)?;
        value = value * 10 + u32::from(byte - b'0');
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::scan_number;
    use crate::decoder::CharDecoder;
    use crate::options::TokenizerOptions;
    use crate::source::ByteSource;
    use crate::token::TokenKind;

    fn run(input: &str) -> Result<crate::token::Token, crate::error::ErrorKind> {
        let mut d = CharDecoder::new(ByteSource::new(input.as_bytes().to_vec()));
        let leading = d.read_char().unwrap().unwrap();
        scan_number(&mut d, 0, leading, &TokenizerOptions::default())
    }

    #[test]
    fn plain_int() {
        let t = run("123 ").unwrap();
        assert_eq!(t.kind, TokenKind::Int);
        assert_eq!((t.start, t.end), (0, 3));
    }

    #[test]
    fn negative_int() {
        let t = run("-42,").unwrap();
        assert_eq!(t.kind, TokenKind::Int);
        assert_eq!((t.start, t.end), (0, 3));
    }

    #[test]
    fn hex_literal() {
        let t = run("0x1F ").unwrap();
        assert_eq!(t.kind, TokenKind::Hex);
        assert_eq!((t.start, t.end), (0, 4));
    }

    #[test]
    fn leading_zero_int_is_error() {
        assert!(run("01").is_err());
    }

    #[test]
    fn decimal_with_d_exponent() {
        let t = run("-123d-1 ").unwrap();
        assert_eq!(t.kind, TokenKind::Decimal);
        assert_eq!((t.start, t.end), (0, 7));
    }

    #[test]
    fn float_with_e_exponent() {
        let t = run("1.5e10 ").unwrap();
        assert_eq!(t.kind, TokenKind::Float);
    }

    #[test]
    fn mis_terminated_number_is_error() {
        assert!(run("123abc").is_err());
    }
}
