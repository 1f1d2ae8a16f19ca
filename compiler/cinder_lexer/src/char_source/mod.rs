//! Code-point reader over a byte stream.
//!
//! [`CharSource`] decodes UTF-8 incrementally from any [`Read`] and keeps a
//! small lookahead queue. The scanner uses the queue for two things:
//! - pushback: [`CharSource::unread`] returns a consumed code point to the front
//! - peeking: [`CharSource::peek_nth`] decodes ahead without consuming
//!
//! Malformed UTF-8 decodes to U+FFFD, one replacement per maximal invalid
//! prefix. The first I/O error ends the stream and is kept for the caller.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};

use tracing::warn;

/// Decoded code points from a byte stream, with pushback.
pub struct CharSource<R> {
    reader: BufReader<R>,
    lookahead: VecDeque<char>,
    exhausted: bool,
    io_error: Option<io::Error>,
}

impl<R: Read> CharSource<R> {
    pub fn new(reader: R) -> Self {
        CharSource {
            reader: BufReader::new(reader),
            lookahead: VecDeque::new(),
            exhausted: false,
            io_error: None,
        }
    }

    /// Consume and return the next code point; `None` at end of input.
    pub fn next_char(&mut self) -> Option<char> {
        if let Some(ch) = self.lookahead.pop_front() {
            return Some(ch);
        }
        self.decode()
    }

    /// The code point `n` positions ahead (`0` is the next one) without
    /// consuming anything.
    pub fn peek_nth(&mut self, n: usize) -> Option<char> {
        while self.lookahead.len() <= n {
            let ch = self.decode()?;
            self.lookahead.push_back(ch);
        }
        self.lookahead.get(n).copied()
    }

    /// Return `ch` to the front of the stream.
    pub fn unread(&mut self, ch: char) {
        self.lookahead.push_front(ch);
    }

    /// `true` once the underlying reader is drained and nothing is queued.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted && self.lookahead.is_empty()
    }

    /// The I/O error that ended the stream early, if any.
    pub fn take_io_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }

    fn decode(&mut self) -> Option<char> {
        let first = self.next_byte()?;
        let width = match first {
            0x00..=0x7F => return Some(char::from(first)),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Some(char::REPLACEMENT_CHARACTER),
        };

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match self.peek_byte() {
                Some(b @ 0x80..=0xBF) => {
                    self.reader.consume(1);
                    *slot = b;
                }
                _ => return Some(char::REPLACEMENT_CHARACTER),
            }
        }

        // Rejects overlong forms and surrogates the width table lets through.
        let decoded = std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next());
        Some(decoded.unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.reader.consume(1);
        Some(byte)
    }

    fn peek_byte(&mut self) -> Option<u8> {
        if self.exhausted {
            return None;
        }
        loop {
            let filled = self.reader.fill_buf().map(|buf| buf.first().copied());
            match filled {
                Ok(Some(byte)) => return Some(byte),
                Ok(None) => {
                    self.exhausted = true;
                    return None;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    warn!(error = %err, "source read failed; treating as end of input");
                    self.exhausted = true;
                    self.io_error = Some(err);
                    return None;
                }
            }
        }
    }
}
