//! UTF-8 decoding, line-ending normalization, and pushback over the byte
//! source.
//!
//! Design note (recorded in `DESIGN.md`): Rust's `char` cannot represent a
//! lone surrogate, so this decoder reads and pushes back full Unicode scalar
//! values rather than 16-bit units. Surrogate-pair assembly and validation
//! for `\uHHHH` escapes happens in [`crate::escape`] instead, which is the
//! only place surrogate handling is externally observable (via
//! `BadEscape`/materialized text).

use crate::error::ErrorKind;
use crate::source::ByteSource;

const PUSHBACK_CAPACITY: usize = 5;
const LINE_OFFSET_CAPACITY: usize = 6;

/// A ring buffer of the `offset` column counters belonging to recently
/// consumed lines, so that unreading a `\n` can restore the exact column the
/// cursor had before it crossed that line boundary.
#[derive(Debug, Clone, Copy)]
struct LineOffsetQueue {
    slots: [usize; LINE_OFFSET_CAPACITY],
    len: usize,
}

impl LineOffsetQueue {
    const fn new() -> Self {
        Self {
            slots: [0; LINE_OFFSET_CAPACITY],
            len: 0,
        }
    }

    fn push(&mut self, offset: usize) {
        assert!(
            self.len < LINE_OFFSET_CAPACITY,
            "line-offset queue overflow"
        );
        self.slots[self.len] = offset;
        self.len += 1;
    }

    fn pop(&mut self) -> usize {
        assert!(self.len > 0, "line-offset queue underflow");
        self.len -= 1;
        self.slots[self.len]
    }
}

/// One entry on the pushback stack: a previously read scalar value plus the
/// number of source bytes it occupied (which, for a normalized `\r\n`, is 2
/// even though exactly one `\n` is yielded), so byte-range reporting
/// survives an unread.
#[derive(Debug, Clone, Copy)]
struct Pushback {
    ch: char,
    byte_len: u8,
    /// The line/column the cursor had right after this char was consumed
    /// (i.e. at the moment it was unread). Restored verbatim when the char
    /// is replayed.
    post_line: usize,
    post_column: usize,
}

/// Everything needed to undo one [`CharDecoder::read_char`] call via
/// [`CharDecoder::unread`].
#[derive(Debug, Clone, Copy)]
struct LastRead {
    ch: char,
    byte_len: u8,
    pre_line: usize,
    pre_column: usize,
}

/// How many of the most recent successful reads [`CharDecoder::unread`] can
/// undo, one call at a time, without an intervening `read_char`. Matches
/// `PUSHBACK_CAPACITY`: every `unread` moves one entry from this history
/// onto the pushback stack, so the two are bounded the same way. Ordinary
/// scanning never chains more than a handful of consecutive unreads
/// (`scanner::symbol::try_scan_signed_inf` is the deepest, at 4), so when
/// this history is full, the oldest entry is evicted rather than refused —
/// it belongs to a read no caller is going to unwind that far back to.
const HISTORY_CAPACITY: usize = PUSHBACK_CAPACITY;

/// Decodes UTF-8 scalars from a [`ByteSource`], normalizing line endings and
/// tracking line/column, with a bounded pushback stack.
#[derive(Debug, Clone)]
pub(crate) struct CharDecoder {
    source: ByteSource,
    pushback: [Option<Pushback>; PUSHBACK_CAPACITY],
    pushback_len: usize,
    line: usize,
    column: usize,
    line_offsets: LineOffsetQueue,
    /// One byte of pending `\r\n` lookahead: when a `\r` is read, one more
    /// byte is peeked to see if it's `\n`; if not, it's buffered here to be
    /// re-decoded on the next call.
    peeked_byte: Option<u8>,
    /// Stack of recent successful reads not yet undone, most recent last.
    /// A failed (EOF) read never touches this — it belongs to the previous
    /// successful read, not to the EOF probe.
    history: [Option<LastRead>; HISTORY_CAPACITY],
    history_len: usize,
}

impl CharDecoder {
    pub(crate) fn new(source: ByteSource) -> Self {
        Self {
            source,
            pushback: [None; PUSHBACK_CAPACITY],
            pushback_len: 0,
            line: 1,
            column: 0,
            line_offsets: LineOffsetQueue::new(),
            peeked_byte: None,
            history: [None; HISTORY_CAPACITY],
            history_len: 0,
        }
    }

    /// Records a successful read, evicting the oldest entry if the history
    /// is full.
    fn push_history(&mut self, entry: LastRead) {
        if self.history_len == HISTORY_CAPACITY {
            self.history.copy_within(1.., 0);
            self.history_len -= 1;
        }
        self.history[self.history_len] = Some(entry);
        self.history_len += 1;
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn column(&self) -> usize {
        self.column
    }

    /// The effective read position: the underlying source's byte cursor,
    /// minus the bytes currently held back (on the pushback stack, or
    /// buffered as `\r\n` lookahead).
    pub(crate) fn position(&self) -> usize {
        let held: usize = self.pushback[..self.pushback_len]
            .iter()
            .map(|p| usize::from(p.unwrap().byte_len))
            .sum();
        let peeked = usize::from(self.peeked_byte.is_some());
        self.source.position() - held - peeked
    }

    pub(crate) fn get_byte(&self, pos: usize) -> Option<u8> {
        self.source.get_byte(pos)
    }

    pub(crate) fn source_len(&self) -> usize {
        self.source.len()
    }

    pub(crate) fn source_slice(&self, start: usize, end: usize) -> &[u8] {
        self.source.slice(start, end)
    }

    pub(crate) fn reset(&mut self) {
        self.source.reset();
        self.pushback = [None; PUSHBACK_CAPACITY];
        self.pushback_len = 0;
        self.line = 1;
        self.column = 0;
        self.line_offsets = LineOffsetQueue::new();
        self.peeked_byte = None;
        self.history = [None; HISTORY_CAPACITY];
        self.history_len = 0;
    }

    /// Returns the next Unicode scalar value, normalizing `\r`/`\r\n`/`\n`
    /// to `\n`, or `None` at end of input.
    pub(crate) fn read_char(&mut self) -> Result<Option<char>, ErrorKind> {
        let pre_line = self.line;
        let pre_column = self.column;

        if self.pushback_len > 0 {
            self.pushback_len -= 1;
            let p = self.pushback[self.pushback_len].take().unwrap();
            self.line = p.post_line;
            self.column = p.post_column;
            self.push_history(LastRead {
                ch: p.ch,
                byte_len: p.byte_len,
                pre_line,
                pre_column,
            });
            return Ok(Some(p.ch));
        }

        // EOF is not a read: the history of undoable reads is left exactly
        // as the previous successful read (if any) left it.
        let Some((raw, mut byte_len)) = self.read_raw_char()? else {
            return Ok(None);
        };

        let normalized = if raw == '\r' {
            if self.peek_raw_byte()? == Some(b'\n') {
                self.take_peeked_byte();
                byte_len += 1;
            }
            '\n'
        } else {
            raw
        };

        if normalized == '\n' {
            self.line_offsets.push(self.column);
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        self.push_history(LastRead {
            ch: normalized,
            byte_len,
            pre_line,
            pre_column,
        });
        Ok(Some(normalized))
    }

    /// Undoes the most recent not-yet-undone [`Self::read_char`] so it will
    /// be returned again by the next call. Consecutive calls with no
    /// intervening `read_char` undo successive reads in reverse order, up
    /// to `HISTORY_CAPACITY` deep. Panics if there is no read to undo.
    pub(crate) fn unread(&mut self) {
        self.history_len = self
            .history_len
            .checked_sub(1)
            .expect("unread without a preceding read");
        let last = self.history[self.history_len].take().unwrap();
        assert!(
            self.pushback_len < PUSHBACK_CAPACITY,
            "pushback stack overflow"
        );
        self.pushback[self.pushback_len] = Some(Pushback {
            ch: last.ch,
            byte_len: last.byte_len,
            post_line: self.line,
            post_column: self.column,
        });
        self.pushback_len += 1;
        self.line = last.pre_line;
        self.column = last.pre_column;
    }

    /// Reads one raw (pre-normalization) UTF-8 scalar and its encoded byte
    /// length directly from the source, honoring a single buffered
    /// lookahead byte from `\r\n` detection.
    fn read_raw_char(&mut self) -> Result<Option<(char, u8)>, ErrorKind> {
        let Some(lead) = self.next_raw_byte() else {
            return Ok(None);
        };
        let len = utf8_len_from_lead(lead).ok_or(ErrorKind::InvalidUtf8)?;
        if len == 1 {
            return Ok(Some((lead as char, 1)));
        }
        let mut buf = [0u8; 4];
        buf[0] = lead;
        for slot in buf.iter_mut().take(len).skip(1) {
            let b = self.next_raw_byte().ok_or(ErrorKind::InvalidUtf8)?;
            if b & 0b1100_0000 != 0b1000_0000 {
                return Err(ErrorKind::InvalidUtf8);
            }
            *slot = b;
        }
        let s = core::str::from_utf8(&buf[..len]).map_err(|_| ErrorKind::InvalidUtf8)?;
        let c = s.chars().next().ok_or(ErrorKind::InvalidUtf8)?;
        Ok(Some((c, len as u8)))
    }

    fn next_raw_byte(&mut self) -> Option<u8> {
        self.take_peeked_byte().or_else(|| self.source.read())
    }

    fn peek_raw_byte(&mut self) -> Result<Option<u8>, ErrorKind> {
        if self.peeked_byte.is_none() {
            self.peeked_byte = self.source.read();
        }
        Ok(self.peeked_byte)
    }

    fn take_peeked_byte(&mut self) -> Option<u8> {
        self.peeked_byte.take()
    }
}

/// Determines the total encoded length of a UTF-8 sequence from its lead
/// byte, or `None` if the lead byte is not a valid sequence start.
fn utf8_len_from_lead(lead: u8) -> Option<usize> {
    if lead & 0b1000_0000 == 0 {
        Some(1)
    } else if lead & 0b1110_0000 == 0b1100_0000 {
        Some(2)
    } else if lead & 0b1111_0000 == 0b1110_0000 {
        Some(3)
    } else if lead & 0b1111_1000 == 0b1111_0000 {
        Some(4)
    } else {
        None
    }
}
