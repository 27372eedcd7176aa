//! On-demand decoding of a tokenized byte range into caller-visible text.
//!
//! Materializing re-reads the raw bytes (the decoder and escape resolver
//! are re-run, not cached from the original scan) and can join several byte
//! ranges — the segments of a long string — into one logical value,
//! carrying a pending high surrogate across the join.

use crate::decoder::CharDecoder;
use crate::error::ErrorKind;
use crate::escape::{Escape, EscapeDecoder};
use crate::options::TokenizerOptions;
use crate::source::ByteSource;

/// Decodes the raw bytes `source[start..end]` into text, resolving
/// `\`-escapes and normalizing line endings. `source` is the full input
/// buffer; `start`/`end` delimit one token's content (already excluding its
/// framing delimiters, per the crate's byte-range invariant).
pub(crate) fn materialize_range(
    source: &[u8],
    start: usize,
    end: usize,
    options: &TokenizerOptions,
) -> Result<String, ErrorKind> {
    let mut escapes = EscapeDecoder::new();
    let text = materialize_segment(source, start, end, options, &mut escapes)?;
    if escapes.has_pending_high_surrogate() {
        return Err(ErrorKind::BadEscape);
    }
    Ok(text)
}

/// Decodes and concatenates several byte ranges as one logical value,
/// carrying escape/surrogate state across the join — used for adjacent long
/// string segments.
pub(crate) fn materialize_concat(
    source: &[u8],
    ranges: &[(usize, usize)],
    options: &TokenizerOptions,
) -> Result<String, ErrorKind> {
    let mut escapes = EscapeDecoder::new();
    let mut out = String::new();
    for &(start, end) in ranges {
        out.push_str(&materialize_segment(source, start, end, options, &mut escapes)?);
    }
    if escapes.has_pending_high_surrogate() {
        return Err(ErrorKind::BadEscape);
    }
    Ok(out)
}

fn materialize_segment(
    source: &[u8],
    start: usize,
    end: usize,
    options: &TokenizerOptions,
    escapes: &mut EscapeDecoder,
) -> Result<String, ErrorKind> {
    let mut decoder = CharDecoder::new(ByteSource::new(source[start..end].to_vec()));
    let mut out = String::new();
    while let Some(c) = decoder.read_char()? {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match escapes.decode(&mut decoder, options)? {
            Escape::Char(ch) | Escape::HexByte(ch) | Escape::UnicodeEscape(ch) => out.push(ch),
            Escape::LineContinuation => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{materialize_concat, materialize_range};
    use crate::options::TokenizerOptions;

    #[test]
    fn decodes_plain_text() {
        let src = b"hello";
        let out = materialize_range(src, 0, src.len(), &TokenizerOptions::default()).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn resolves_escapes() {
        let src = b"hi\\u00FFthere";
        let out = materialize_range(src, 0, src.len(), &TokenizerOptions::default()).unwrap();
        assert_eq!(out, "hi\u{ff}there");
    }

    #[test]
    fn normalizes_line_endings() {
        let src = b"a\r\nb";
        let out = materialize_range(src, 0, src.len(), &TokenizerOptions::default()).unwrap();
        assert_eq!(out, "a\nb");
    }

    #[test]
    fn concatenates_long_string_segments() {
        let src = b"ab";
        let out =
            materialize_concat(src, &[(0, 1), (1, 2)], &TokenizerOptions::default()).unwrap();
        assert_eq!(out, "ab");
    }

    #[test]
    fn unpaired_surrogate_at_end_of_value_is_error() {
        let src = b"\\uD83D";
        assert!(materialize_range(src, 0, src.len(), &TokenizerOptions::default()).is_err());
    }
}
