//! Resolves `\`-escapes inside quoted symbols, short strings, and long
//! strings.
//!
//! Covers the full Ion escape set, and adds surrogate pairing: a `\uHHHH`
//! that decodes to a high surrogate is held as `pending_high_surrogate`
//! until the following escape supplies its low surrogate. A pending high
//! surrogate that is never paired is surfaced to the caller as an error
//! rather than silently dropped.

use crate::decoder::CharDecoder;
use crate::error::ErrorKind;
use crate::options::TokenizerOptions;

/// The result of resolving one `\`-escape (the backslash itself already
/// consumed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Escape {
    /// A decoded scalar value to append to the value text.
    Char(char),
    /// `\xHH`: a raw byte value in `0x00..=0xFF`, represented as its
    /// Latin-1-equivalent scalar. Does not, by itself, force a UTF-8 string
    /// kind (see [`TokenizerOptions::xhh_escape_preserves_clob_kind`]).
    HexByte(char),
    /// `\uHHHH` or `\UHHHHHHHH`: forces a UTF-8 string kind regardless of
    /// the decoded code point's value.
    UnicodeEscape(char),
    /// `\` immediately followed by a newline: a line continuation inside a
    /// long string: no character is produced.
    LineContinuation,
}

/// Tracks a high surrogate pending pairing across escape decodes within one
/// token (or, for long strings, across adjacent segments of the same
/// logical value).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct EscapeDecoder {
    pending_high_surrogate: Option<u16>,
}

impl EscapeDecoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `true` if a `\uHHHH` high surrogate is still awaiting its pair. The
    /// caller must treat this as an error (`BadEscape`) if the value ends,
    /// or a long-string segment boundary is crossed, while this is set.
    pub(crate) fn has_pending_high_surrogate(&self) -> bool {
        self.pending_high_surrogate.is_some()
    }

    /// Resolves one escape sequence, given that the decoder has just
    /// consumed the leading backslash. Reads as many further characters as
    /// the escape requires.
    pub(crate) fn decode(
        &mut self,
        decoder: &mut CharDecoder,
        options: &TokenizerOptions,
    ) -> Result<Escape, ErrorKind> {
        let c = decoder.read_char()?.ok_or(ErrorKind::UnexpectedEof)?;
        let simple = match c {
            '0' => Some('\0'),
            'a' => Some('\u{7}'),
            'b' => Some('\u{8}'),
            't' => Some('\t'),
            'n' => Some('\n'),
            'f' => Some('\u{C}'),
            'r' => Some('\r'),
            'v' => Some('\u{B}'),
            '"' => Some('"'),
            '\'' => Some('\''),
            '?' => Some('?'),
            '\\' => Some('\\'),
            '/' => Some('/'),
            _ => None,
        };
        if let Some(decoded) = simple {
            return self.finish_non_surrogate(decoded, false);
        }
        match c {
            '\n' => {
                if self.pending_high_surrogate.is_some() {
                    return Err(ErrorKind::BadEscape);
                }
                Ok(Escape::LineContinuation)
            }
            'x' => {
                let byte = read_hex_digits(decoder, 2)? as u8;
                self.finish_non_surrogate(byte as char, true)
            }
            'u' => {
                let value = read_hex_digits(decoder, 4)?;
                self.finish_u16_unit(value)
            }
            'U' => {
                if !options.allow_uppercase_u_escape {
                    return Err(ErrorKind::BadEscape);
                }
                let value = read_hex_digits(decoder, 8)?;
                if self.pending_high_surrogate.is_some() {
                    return Err(ErrorKind::BadEscape);
                }
                let ch = char::from_u32(value).ok_or(ErrorKind::BadEscape)?;
                Ok(Escape::UnicodeEscape(ch))
            }
            _ => Err(ErrorKind::BadEscape),
        }
    }

    fn finish_non_surrogate(&mut self, ch: char, is_hex_byte: bool) -> Result<Escape, ErrorKind> {
        if self.pending_high_surrogate.is_some() {
            return Err(ErrorKind::BadEscape);
        }
        Ok(if is_hex_byte {
            Escape::HexByte(ch)
        } else {
            Escape::Char(ch)
        })
    }

    /// Handles a `\uHHHH` 16-bit unit: combines with a pending high
    /// surrogate, starts a new pending high surrogate, or passes through a
    /// non-surrogate code point.
    fn finish_u16_unit(&mut self, unit: u32) -> Result<Escape, ErrorKind> {
        let is_high = (0xD800..=0xDBFF).contains(&unit);
        let is_low = (0xDC00..=0xDFFF).contains(&unit);

        if let Some(high) = self.pending_high_surrogate {
            if !is_low {
                return Err(ErrorKind::BadEscape);
            }
            self.pending_high_surrogate = None;
            let scalar = 0x10000
                + ((u32::from(high) - 0xD800) << 10)
                + (unit - 0xDC00);
            let ch = char::from_u32(scalar).ok_or(ErrorKind::BadEscape)?;
            return Ok(Escape::UnicodeEscape(ch));
        }

        if is_high {
            self.pending_high_surrogate = Some(unit as u16);
            // Caller decides how to surface "no character produced yet";
            // the materializer loops back around for the next escape.
            return Ok(Escape::LineContinuation);
        }
        if is_low {
            return Err(ErrorKind::BadEscape);
        }
        let ch = char::from_u32(unit).ok_or(ErrorKind::BadEscape)?;
        Ok(Escape::UnicodeEscape(ch))
    }
}

/// Reads exactly `n` hex digits and returns their combined value.
fn read_hex_digits(decoder: &mut CharDecoder, n: u32) -> Result<u32, ErrorKind> {
    let mut value: u32 = 0;
    for _ in 0..n {
        let c = decoder.read_char()?.ok_or(ErrorKind::UnexpectedEof)?;
        let digit = c.to_digit(16).ok_or(ErrorKind::BadEscape)?;
        value = (value << 4) | digit;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{Escape, EscapeDecoder};
    use crate::decoder::CharDecoder;
    use crate::options::TokenizerOptions;
    use crate::source::ByteSource;

    fn decode(input: &str) -> Result<Escape, crate::error::ErrorKind> {
        let mut decoder = CharDecoder::new(ByteSource::new(input.as_bytes().to_vec()));
        let mut esc = EscapeDecoder::new();
        esc.decode(&mut decoder, &TokenizerOptions::default())
    }

    #[test]
    fn decodes_simple_escapes() {
        assert_eq!(decode("n").unwrap(), Escape::Char('\n'));
        assert_eq!(decode("t").unwrap(), Escape::Char('\t'));
        assert_eq!(decode("\\").unwrap(), Escape::Char('\\'));
    }

    #[test]
    fn decodes_hex_byte() {
        assert_eq!(decode("x41").unwrap(), Escape::HexByte('A'));
    }

    #[test]
    fn decodes_unicode_escape() {
        assert_eq!(decode("u00e9").unwrap(), Escape::UnicodeEscape('\u{e9}'));
    }

    #[test]
    fn decodes_capital_u_escape() {
        assert_eq!(
            decode("U0001F600").unwrap(),
            Escape::UnicodeEscape('\u{1F600}')
        );
    }

    #[test]
    fn line_continuation_produces_no_char() {
        assert_eq!(decode("\n").unwrap(), Escape::LineContinuation);
    }

    #[test]
    fn pairs_surrogates_across_two_calls() {
        let mut decoder = CharDecoder::new(ByteSource::new(b"uD83D\\uDE00".to_vec()));
        let mut esc = EscapeDecoder::new();
        let opts = TokenizerOptions::default();
        let first = esc.decode(&mut decoder, &opts).unwrap();
        assert_eq!(first, Escape::LineContinuation);
        assert!(esc.has_pending_high_surrogate());
        assert_eq!(decoder.read_char().unwrap(), Some('\\'));
        let second = esc.decode(&mut decoder, &opts).unwrap();
        assert_eq!(second, Escape::UnicodeEscape('\u{1F600}'));
        assert!(!esc.has_pending_high_surrogate());
    }

    #[test]
    fn unpaired_high_surrogate_errors_on_non_surrogate_follow_up() {
        let mut decoder = CharDecoder::new(ByteSource::new(b"uD83Dn".to_vec()));
        let mut esc = EscapeDecoder::new();
        let opts = TokenizerOptions::default();
        esc.decode(&mut decoder, &opts).unwrap();
        assert!(esc.decode(&mut decoder, &opts).is_err());
    }

    #[test]
    fn unknown_escape_is_bad_escape() {
        assert!(decode("q").is_err());
    }
}
