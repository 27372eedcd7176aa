//! The two-character punctuation tokens: `::` vs `:`, `{{` vs `{`.

use super::peek1;
use crate::decoder::CharDecoder;
use crate::token::{Token, TokenKind};

/// `start` is the byte offset of the already-consumed leading `:`.
pub(crate) fn scan_colon(decoder: &mut CharDecoder, start: usize) -> Token {
    if matches!(peek1(decoder), Ok(Some(':'))) {
        decoder.read_char().ok();
        Token::new(TokenKind::DoubleColon, start, decoder.position())
    } else {
        Token::new(TokenKind::Colon, start, decoder.position())
    }
}

/// `start` is the byte offset of the already-consumed leading `{`.
pub(crate) fn scan_open_brace(decoder: &mut CharDecoder, start: usize) -> Token {
    if matches!(peek1(decoder), Ok(Some('{'))) {
        decoder.read_char().ok();
        Token::new(TokenKind::OpenDoubleBrace, start, decoder.position())
    } else {
        Token::new(TokenKind::OpenBrace, start, decoder.position())
    }
}

#[cfg(test)]
mod tests {
    use super::{scan_colon, scan_open_brace};
    use crate::decoder::CharDecoder;
    use crate::source::ByteSource;
    use crate::token::TokenKind;

    #[test]
    fn single_colon() {
        let mut d = CharDecoder::new(ByteSource::new(b":a".to_vec()));
        d.read_char().unwrap();
        let t = scan_colon(&mut d, 0);
        assert_eq!(t.kind, TokenKind::Colon);
        assert_eq!((t.start, t.end), (0, 1));
    }

    #[test]
    fn double_colon() {
        let mut d = CharDecoder::new(ByteSource::new(b"::a".to_vec()));
        d.read_char().unwrap();
        let t = scan_colon(&mut d, 0);
        assert_eq!(t.kind, TokenKind::DoubleColon);
        assert_eq!((t.start, t.end), (0, 2));
    }

    #[test]
    fn open_double_brace() {
        let mut d = CharDecoder::new(ByteSource::new(b"{{a".to_vec()));
        d.read_char().unwrap();
        let t = scan_open_brace(&mut d, 0);
        assert_eq!(t.kind, TokenKind::OpenDoubleBrace);
        assert_eq!((t.start, t.end), (0, 2));
    }
}
