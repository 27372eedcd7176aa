//! The tokenizer façade: ties the byte source, character decoder, token
//! queue, scanners, keyword recognizer, and value materializer together
//! behind the external interface the enclosing parser calls.
//!
//! Single-threaded and synchronous by convention: nothing here suspends,
//! and a `Tokenizer` must not be shared across threads without external
//! synchronization. `save`/`restore` additionally requires the caller not
//! to interleave other tokenizer calls between taking a saved copy and
//! restoring it.

use crate::decoder::CharDecoder;
use crate::error::{ErrorKind, TokenizerError};
use crate::keyword;
use crate::materializer;
use crate::options::TokenizerOptions;
use crate::queue::TokenQueue;
use crate::scanner;
use crate::source::ByteSource;
use crate::token::{KeywordTag, Token, TokenKind};

/// A streaming lexical analyzer over a fixed Ion text byte buffer.
///
/// See the crate documentation for the overall design; this type is the
/// single entry point the rest of the crate is built to support.
pub struct Tokenizer {
    decoder: CharDecoder,
    queue: TokenQueue,
    options: TokenizerOptions,
}

/// An opaque snapshot of a [`Tokenizer`]'s full mutable state, taken by
/// [`Tokenizer::get_saved_copy`] and consumed by [`Tokenizer::restore_state`].
///
/// This is a plain value copy (not a diff or a journal): restoring swaps it
/// back in wholesale, so the hot path never allocates beyond the clone
/// itself.
#[derive(Clone)]
pub struct SavedTokenizerState {
    decoder: CharDecoder,
    queue: TokenQueue,
}

impl Tokenizer {
    /// Constructs a tokenizer over `bytes` with default options.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_options(bytes, TokenizerOptions::default())
    }

    /// Constructs a tokenizer over `bytes` with explicit options.
    #[must_use]
    pub fn with_options(bytes: impl Into<Vec<u8>>, options: TokenizerOptions) -> Self {
        Self {
            decoder: CharDecoder::new(ByteSource::new(bytes.into())),
            queue: TokenQueue::new(),
            options,
        }
    }

    /// The options this tokenizer was constructed with.
    #[must_use]
    pub fn options(&self) -> TokenizerOptions {
        self.options
    }

    /// Peeks the kind of the token `k` positions ahead of the current one
    /// (`lookahead(0)` is the current token), lazily filling the queue as
    /// needed. `k` must be less than 7.
    pub fn lookahead(&mut self, k: usize) -> Result<TokenKind, TokenizerError> {
        while self.queue.count() <= k {
            self.fill_queue()?;
        }
        Ok(self.queue.peek(k).expect("queue was just filled").kind)
    }

    /// Discards the head token. The caller must have already observed it
    /// via [`Self::lookahead`]/[`Self::current_token`].
    pub fn consume_token(&mut self) -> Result<(), TokenizerError> {
        if self.queue.is_empty() {
            self.fill_queue()?;
        }
        self.queue.dequeue().map(|_| ()).map_err(|e| self.err(e))
    }

    /// The kind of the current (head) token.
    pub fn current_token(&mut self) -> Result<TokenKind, TokenizerError> {
        self.lookahead(0)
    }

    /// The start byte offset of the current token's range.
    pub fn value_start(&mut self) -> Result<usize, TokenizerError> {
        self.lookahead(0)?;
        Ok(self.queue.peek(0).expect("just filled").start)
    }

    /// The end byte offset of the current token's range.
    pub fn value_end(&mut self) -> Result<usize, TokenizerError> {
        self.lookahead(0)?;
        Ok(self.queue.peek(0).expect("just filled").end)
    }

    /// Decodes the current token's byte range into text.
    pub fn value_as_string(&mut self) -> Result<String, TokenizerError> {
        let start = self.value_start()?;
        let end = self.value_end()?;
        self.materialize_range(start, end)
    }

    /// Decodes an arbitrary byte range into text (the explicit-range
    /// overload of [`Tokenizer::value_as_string`]).
    pub fn materialize_range(&self, start: usize, end: usize) -> Result<String, TokenizerError> {
        let bytes = self.decoder.source_slice(start, end);
        materializer::materialize_range(bytes, 0, bytes.len(), &self.options)
            .map_err(|e| self.err(e))
    }

    /// Decodes and concatenates several byte ranges (adjacent long-string
    /// segments) into one logical value.
    pub fn materialize_concat(&self, ranges: &[(usize, usize)]) -> Result<String, TokenizerError> {
        let bytes = self.decoder.source_slice(0, self.decoder.source_len());
        materializer::materialize_concat(bytes, ranges, &self.options).map_err(|e| self.err(e))
    }

    /// Random-access byte read, for keyword matching and timestamp
    /// backtracking.
    #[must_use]
    pub fn get_byte(&self, pos: usize) -> Option<u8> {
        self.decoder.get_byte(pos)
    }

    /// Identifies a reserved word in `source[start..end]`, or `None` if it
    /// is an ordinary symbol.
    #[must_use]
    pub fn keyword(&self, start: usize, end: usize) -> Option<KeywordTag> {
        let bytes = self.decoder.source_slice(start, end);
        let text = core::str::from_utf8(bytes).ok()?;
        keyword::lookup(text)
    }

    /// Skips whitespace and peeks one character without consuming it, so
    /// the parser can distinguish `{{ "…" }}` from `{{ base64 }}` without
    /// committing to either.
    pub fn lob_lookahead(&mut self) -> Result<Option<char>, TokenizerError> {
        loop {
            match self.decoder.read_char().map_err(|e| self.err(e))? {
                Some(' ' | '\t' | '\n') => continue,
                other => {
                    if other.is_some() {
                        self.decoder.unread();
                    }
                    return Ok(other);
                }
            }
        }
    }

    /// Scans a base-64 blob body after the parser has consumed `{{` and
    /// decided the content is a blob.
    pub fn scan_base64_value(&mut self) -> Result<Token, TokenizerError> {
        scanner::scan_base64(&mut self.decoder).map_err(|e| self.err(e))
    }

    /// After a `CLOSE_BRACE`, peeks one character to decide whether this is
    /// really the second half of a `}}` (ambiguous with two consecutive
    /// struct closes, so it is never tokenized as one token).
    pub fn is_really_double_brace(&mut self) -> Result<bool, TokenizerError> {
        let next = self.decoder.read_char().map_err(|e| self.err(e))?;
        if next.is_some() {
            self.decoder.unread();
        }
        Ok(next == Some('}'))
    }

    /// Snapshots the full mutable state so the caller may explore an
    /// alternative parse and later restore.
    #[must_use]
    pub fn get_saved_copy(&self) -> SavedTokenizerState {
        SavedTokenizerState {
            decoder: self.decoder.clone(),
            queue: self.queue.clone(),
        }
    }

    /// Restores state captured by [`Self::get_saved_copy`]. The caller must
    /// not have interleaved other tokenizer calls since taking the copy.
    pub fn restore_state(&mut self, saved: SavedTokenizerState) {
        self.decoder = saved.decoder;
        self.queue = saved.queue;
    }

    /// A human-readable description of the current input position, for
    /// diagnostics.
    #[must_use]
    pub fn input_position(&self) -> String {
        format!("{}:{}", self.decoder.line(), self.decoder.column())
    }

    /// The current 1-based line number.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.decoder.line()
    }

    /// The current 0-based column offset within the line.
    #[must_use]
    pub fn line_offset(&self) -> usize {
        self.decoder.column()
    }

    /// Returns the tokenizer to its initial state, as if freshly
    /// constructed over the same bytes.
    pub fn reset(&mut self) {
        self.decoder.reset();
        self.queue = TokenQueue::new();
    }

    /// Releases the underlying byte buffer. The tokenizer must not be used
    /// afterward except via `reset`.
    pub fn close(&mut self) {
        self.decoder = CharDecoder::new(ByteSource::new(Vec::new()));
        self.queue = TokenQueue::new();
    }

    fn fill_queue(&mut self) -> Result<(), TokenizerError> {
        let token = scanner::next_token(&mut self.decoder, &self.options).map_err(|e| self.err(e))?;
        self.queue.enqueue(token).map_err(|e| self.err(e))
    }

    fn err(&self, kind: ErrorKind) -> TokenizerError {
        TokenizerError::new(kind, self.decoder.line(), self.decoder.column())
    }
}
