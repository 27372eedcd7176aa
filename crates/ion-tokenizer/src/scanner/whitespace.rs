//! Skips whitespace and comments ahead of the next significant token.

use crate::decoder::CharDecoder;
use crate::error::ErrorKind;

/// Consumes runs of `SPACE`/`TAB`/`\n` and `// ... \n` / `/* ... */`
/// comments, leaving the decoder positioned at the first character of the
/// next real token (or at EOF).
pub(crate) fn skip_whitespace_and_comments(decoder: &mut CharDecoder) -> Result<(), ErrorKind> {
    loop {
        let Some(c) = decoder.read_char()? else {
            return Ok(());
        };
        match c {
            ' ' | '\t' | '\n' => continue,
            '/' => {
                let Some(next) = decoder.read_char()? else {
                    decoder.unread();
                    return Ok(());
                };
                match next {
                    '/' => skip_line_comment(decoder)?,
                    '*' => skip_block_comment(decoder)?,
                    _ => {
                        decoder.unread(); // `next`
                        decoder.unread(); // `/`
                        return Ok(());
                    }
                }
            }
            _ => {
                decoder.unread();
                return Ok(());
            }
        }
    }
}

fn skip_line_comment(decoder: &mut CharDecoder) -> Result<(), ErrorKind> {
    loop {
        match decoder.read_char()? {
            None | Some('\n') => return Ok(()),
            Some(_) => continue,
        }
    }
}

fn skip_block_comment(decoder: &mut CharDecoder) -> Result<(), ErrorKind> {
    loop {
        match decoder.read_char()? {
            None => return Err(ErrorKind::UnexpectedEof),
            Some('*') => match decoder.read_char()? {
                Some('/') => return Ok(()),
                // A `*` right at EOF ends the comment's token stream, not
                // the comment itself; don't unread into a retry loop.
                None => return Err(ErrorKind::UnexpectedEof),
                Some(_) => decoder.unread(),
            },
            Some(_) => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::skip_whitespace_and_comments;
    use crate::decoder::CharDecoder;
    use crate::source::ByteSource;

    fn decoder(s: &str) -> CharDecoder {
        CharDecoder::new(ByteSource::new(s.as_bytes().to_vec()))
    }

    #[test]
    fn skips_spaces_and_newlines() {
        let mut d = decoder("  \n\t x");
        skip_whitespace_and_comments(&mut d).unwrap();
        assert_eq!(d.read_char().unwrap(), Some('x'));
    }

    #[test]
    fn skips_line_comment() {
        let mut d = decoder("// hi\nx");
        skip_whitespace_and_comments(&mut d).unwrap();
        assert_eq!(d.read_char().unwrap(), Some('x'));
    }

    #[test]
    fn skips_block_comment() {
        let mut d = decoder("/* a * b */x");
        skip_whitespace_and_comments(&mut d).unwrap();
        assert_eq!(d.read_char().unwrap(), Some('x'));
    }

    #[test]
    fn unterminated_block_comment_is_unexpected_eof() {
        let mut d = decoder("/* oops");
        assert!(skip_whitespace_and_comments(&mut d).is_err());
    }

    #[test]
    fn block_comment_ending_in_lone_star_is_unexpected_eof() {
        let mut d = decoder("/* oops*");
        assert!(skip_whitespace_and_comments(&mut d).is_err());
    }

    #[test]
    fn bare_slash_is_left_for_dispatch() {
        let mut d = decoder("/x");
        skip_whitespace_and_comments(&mut d).unwrap();
        assert_eq!(d.read_char().unwrap(), Some('/'));
    }
}
