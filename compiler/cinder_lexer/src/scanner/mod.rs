//! The scanner: one [`Token`] per [`Scanner::scan`] call.
//!
//! Every consumed code point is appended to the scanner's source buffer,
//! which backs all token [`Loc`]s, and advances the cursor [`Position`].
//! [`Scanner::unread`] undoes exactly one advance: it restores the saved
//! position and buffer length and hands the code point back to the
//! [`CharSource`].
//!
//! # Dispatch
//!
//! After skipping whitespace the first code point decides the lexeme:
//! letters and `_` start identifiers, digits start numbers, `"` and `` ` ``
//! start strings, and everything else is an operator or delimiter matched
//! longest-first. `//` comments are skipped without producing a token.
//! Input nothing matches becomes a one-code-point [`Tag::Illegal`] token;
//! the scanner itself never fails.

use std::io::{self, Read};
use std::sync::Arc;

use cinder_ir::{keywords, Loc, Position, Tag, Token};
use tracing::trace;

use crate::char_source::CharSource;
use crate::escape::resolve_escape;

/// Buffer capacity used when the caller has no size estimate.
pub const DEFAULT_SIZE_HINT: usize = 4096;

/// State needed to undo the most recent advance.
#[derive(Clone, Copy, Debug)]
struct Undo {
    ch: char,
    offset: usize,
    line: u32,
    column: u32,
}

/// Lexical scanner over a byte stream.
pub struct Scanner<R> {
    chars: CharSource<R>,
    pos: Position,
    undo: Option<Undo>,
    source: String,
}

impl<'a> Scanner<&'a [u8]> {
    /// Scan an in-memory string.
    pub fn from_source(source: &'a str, filename: impl Into<Arc<str>>) -> Self {
        Scanner::new(source.as_bytes(), filename, source.len())
    }
}

impl<R: Read> Scanner<R> {
    /// Create a scanner reading from `reader`.
    ///
    /// `size_hint` pre-sizes the source buffer; it is an estimate, not a
    /// limit.
    pub fn new(reader: R, filename: impl Into<Arc<str>>, size_hint: usize) -> Self {
        Scanner {
            chars: CharSource::new(reader),
            pos: Position::start(filename),
            undo: None,
            source: String::with_capacity(size_hint),
        }
    }

    /// Create a scanner with [`DEFAULT_SIZE_HINT`].
    pub fn with_filename(reader: R, filename: impl Into<Arc<str>>) -> Self {
        Scanner::new(reader, filename, DEFAULT_SIZE_HINT)
    }

    /// Everything consumed so far. Token [`Loc`]s index into this.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Cursor position (just past the last consumed code point).
    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn filename(&self) -> &str {
        &self.pos.filename
    }

    /// The I/O error that cut the input short, if one occurred.
    ///
    /// The scanner reports such input as ending normally; callers that care
    /// about truncated files check here after reaching `Eof`.
    pub fn take_io_error(&mut self) -> Option<io::Error> {
        self.chars.take_io_error()
    }

    /// Produce the next token.
    ///
    /// At end of input this returns [`Tag::Eof`] on every call and the
    /// position no longer moves.
    pub fn scan(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            if let Some(tok) = self.scan_lexeme() {
                trace!(
                    tag = %tok.tag,
                    start = tok.loc.start,
                    end = tok.loc.end,
                    line = tok.pos.line,
                    column = tok.pos.column,
                    "scan"
                );
                return tok;
            }
        }
    }

    /// Tokens up to and including the first `Eof`.
    pub fn tokens(&mut self) -> impl Iterator<Item = Token> + '_ {
        let mut done = false;
        std::iter::from_fn(move || {
            if done {
                return None;
            }
            let tok = self.scan();
            done = tok.tag == Tag::Eof;
            Some(tok)
        })
    }

    /// Scan one lexeme. `None` means a comment was skipped.
    fn scan_lexeme(&mut self) -> Option<Token> {
        let start = self.pos.clone();

        let Some(ch) = self.advance() else {
            return Some(self.token(Tag::Eof, start));
        };

        let tok = match ch {
            c if is_ident_start(c) => self.scan_ident(start),
            c if c.is_ascii_digit() => self.scan_number(start),
            '"' => self.scan_string(start),
            '`' => self.scan_raw_string(start),

            '(' => self.token(Tag::Lparen, start),
            ')' => self.token(Tag::Rparen, start),
            '{' => self.token(Tag::Lbrace, start),
            '}' => self.token(Tag::Rbrace, start),
            '[' => self.token(Tag::Lbrack, start),
            ']' => self.token(Tag::Rbrack, start),
            ';' => self.token(Tag::Semicolon, start),
            ',' => self.token(Tag::Comma, start),
            '.' => self.dot(start),
            ':' => self.one_or_two(start, Tag::Colon, &[('=', Tag::Define)]),

            '+' => self.one_or_two(start, Tag::Add, &[('+', Tag::Inc), ('=', Tag::AddAssign)]),
            '-' => self.one_or_two(start, Tag::Sub, &[('-', Tag::Dec), ('=', Tag::SubAssign)]),
            '*' => self.one_or_two(start, Tag::Mul, &[('=', Tag::MulAssign)]),
            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                    return None;
                }
                self.one_or_two(start, Tag::Quo, &[('=', Tag::QuoAssign)])
            }
            '%' => self.one_or_two(start, Tag::Rem, &[('=', Tag::RemAssign)]),
            '^' => self.one_or_two(start, Tag::Xor, &[('=', Tag::XorAssign)]),
            '|' => self.one_or_two(start, Tag::Or, &[('|', Tag::Lor), ('=', Tag::OrAssign)]),
            '&' => self.one_or_two(start, Tag::And, &[('&', Tag::Land), ('=', Tag::AndAssign)]),
            '!' => self.one_or_two(start, Tag::Not, &[('=', Tag::Neq)]),
            '=' => self.one_or_two(start, Tag::Assign, &[('=', Tag::Eql)]),
            '<' => self.less(start),
            '>' => self.greater(start),

            _ => self.token(Tag::Illegal, start),
        };
        Some(tok)
    }

    // ─── Cursor ─────────────────────────────────────────────────────

    /// Consume one code point, recording how to undo it.
    fn advance(&mut self) -> Option<char> {
        let Some(ch) = self.chars.next_char() else {
            // Nothing was consumed, so there is nothing to push back.
            self.undo = None;
            return None;
        };
        self.undo = Some(Undo {
            ch,
            offset: self.pos.offset,
            line: self.pos.line,
            column: self.pos.column,
        });
        self.source.push(ch);
        self.pos.advance(ch);
        Some(ch)
    }

    /// Push the last consumed code point back. Only one level is kept.
    fn unread(&mut self) {
        let Some(undo) = self.undo.take() else {
            return;
        };
        self.source.truncate(self.source.len() - undo.ch.len_utf8());
        self.pos.offset = undo.offset;
        self.pos.line = undo.line;
        self.pos.column = undo.column;
        self.chars.unread(undo.ch);
    }

    /// Consume the next code point if it is `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        match self.advance() {
            Some(ch) if ch == expected => true,
            Some(_) => {
                self.unread();
                false
            }
            None => false,
        }
    }

    /// Consume code points while `pred` holds.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.advance() {
            if !pred(ch) {
                self.unread();
                break;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    /// Discard through the end of the line (the newline included).
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn token(&self, tag: Tag, start: Position) -> Token {
        let loc = Loc::new(start.offset, self.pos.offset);
        Token::new(tag, loc, start)
    }

    // ─── Operators ──────────────────────────────────────────────────

    /// One-step longest match: try each `(next, tag)` extension in order,
    /// falling back to `single`.
    fn one_or_two(&mut self, start: Position, single: Tag, extensions: &[(char, Tag)]) -> Token {
        for &(next, tag) in extensions {
            if self.match_char(next) {
                return self.token(tag, start);
            }
        }
        self.token(single, start)
    }

    /// `<`, `<=`, `<-`, `<<`, `<<=`
    fn less(&mut self, start: Position) -> Token {
        if self.match_char('<') {
            return self.one_or_two(start, Tag::Shl, &[('=', Tag::ShlAssign)]);
        }
        self.one_or_two(start, Tag::Lss, &[('=', Tag::Leq), ('-', Tag::Arrow)])
    }

    /// `>`, `>=`, `>>`, `>>=`
    fn greater(&mut self, start: Position) -> Token {
        if self.match_char('>') {
            return self.one_or_two(start, Tag::Shr, &[('=', Tag::ShrAssign)]);
        }
        self.one_or_two(start, Tag::Gtr, &[('=', Tag::Geq)])
    }

    /// `.` or `...`; `..` is two periods.
    fn dot(&mut self, start: Position) -> Token {
        if self.chars.peek_nth(0) == Some('.') && self.chars.peek_nth(1) == Some('.') {
            self.advance();
            self.advance();
            return self.token(Tag::Ellipsis, start);
        }
        self.token(Tag::Period, start)
    }

    // ─── Words and numbers ──────────────────────────────────────────

    fn scan_ident(&mut self, start: Position) -> Token {
        self.eat_while(is_ident_continue);
        let tag = keywords::lookup(&self.source[start.offset..self.pos.offset]);
        self.token(tag, start)
    }

    /// `123` is `Int`, `123.45` is `Float`. In `123.` or `123.x` the period
    /// is not part of the number.
    fn scan_number(&mut self, start: Position) -> Token {
        self.eat_while(|c| c.is_ascii_digit());

        let fraction = self.chars.peek_nth(0) == Some('.')
            && self.chars.peek_nth(1).is_some_and(|c| c.is_ascii_digit());
        if !fraction {
            return self.token(Tag::Int, start);
        }

        self.advance();
        self.eat_while(|c| c.is_ascii_digit());
        self.token(Tag::Float, start)
    }

    // ─── Strings ────────────────────────────────────────────────────

    /// Double-quoted string. The token covers the text between the quotes;
    /// an unterminated string runs to end of input.
    ///
    /// The value is built here, while the escape letter is still known: the
    /// buffer cannot tell a rewritten `\n` from a backslash followed by a
    /// real newline.
    fn scan_string(&mut self, start: Position) -> Token {
        let content_start = self.pos.offset;
        let mut content_end = None;
        let mut value = String::new();

        while let Some(ch) = self.advance() {
            match ch {
                '"' => {
                    content_end = Some(self.pos.offset - 1);
                    break;
                }
                '\\' => {
                    let Some(esc) = self.advance() else {
                        value.push('\\');
                        break;
                    };
                    if let Some(resolved) = resolve_escape(esc) {
                        self.rewrite_last(resolved);
                        value.push(resolved);
                    } else {
                        value.push('\\');
                        value.push(esc);
                    }
                }
                _ => value.push(ch),
            }
        }

        let end = content_end.unwrap_or(self.pos.offset);
        Token::new(Tag::String, Loc::new(content_start, end), start).with_value(value)
    }

    /// Backtick string, taken verbatim.
    fn scan_raw_string(&mut self, start: Position) -> Token {
        let content_start = self.pos.offset;
        let mut content_end = None;
        let mut value = String::new();

        while let Some(ch) = self.advance() {
            if ch == '`' {
                content_end = Some(self.pos.offset - 1);
                break;
            }
            value.push(ch);
        }

        let end = content_end.unwrap_or(self.pos.offset);
        Token::new(Tag::String, Loc::new(content_start, end), start).with_value(value)
    }

    /// Replace the last buffered code point with one of the same width.
    fn rewrite_last(&mut self, replacement: char) {
        let Some(last) = self.source.pop() else {
            return;
        };
        debug_assert_eq!(last.len_utf8(), replacement.len_utf8());
        self.source.push(replacement);
        // The buffer no longer holds what was read; it cannot be pushed back.
        self.undo = None;
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests;
