//! The expression parser.
//!
//! Precedence climbing over a two-token window (`current`, `peek`) pulled
//! from a [`Scanner`]. `parse_precedence(min)` runs the prefix handler of
//! the current token, then keeps folding infix operators from `peek` into
//! the result while they bind at least as tightly as `min`.

mod handlers;

use std::io::Read;

use cinder_ir::{Expr, Precedence, Tag, Token};
use cinder_lexer::Scanner;
use cinder_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::{Infix, ParseError, ParseErrorKind, Prefix, RuleTable};

/// Pull-based expression parser.
///
/// ```text
/// let mut parser = Parser::new(Scanner::from_source("a = 1 + 2", "main.cn"));
/// let expr = parser.parse()?;
/// assert_eq!(expr.to_string(), "(= a (+ 1 2))");
/// ```
pub struct Parser<R> {
    scanner: Scanner<R>,
    current: Token,
    peek: Token,
    rules: RuleTable,
    /// Errors collected while advancing, in source order.
    errors: Vec<ParseError>,
    /// How many of `errors` a `parse` call has already returned.
    reported: usize,
}

impl<R: Read> Parser<R> {
    /// Parser over `scanner` with the standard rule table.
    pub fn new(scanner: Scanner<R>) -> Self {
        Parser::with_rules(scanner, RuleTable::standard())
    }

    /// Parser over `scanner` with a caller-supplied rule table.
    ///
    /// Primes the token window, so the first two tokens are read here.
    pub fn with_rules(scanner: Scanner<R>, rules: RuleTable) -> Self {
        let mut parser = Parser {
            scanner,
            current: Token::default(),
            peek: Token::default(),
            rules,
            errors: Vec::new(),
            reported: 0,
        };
        parser.next_token();
        parser.next_token();
        parser
    }

    /// Parse one expression at the loosest precedence.
    ///
    /// On success the parser has moved past the expression, so calling
    /// `parse` again reads the expression that follows. If an invalid token
    /// was met along the way, the first such error is returned even when the
    /// expression itself was recognized. No recovery is attempted; after an
    /// error the parser should be discarded.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let result = self.parse_precedence(Precedence::Assignment);
        if let Some(err) = self.errors.get(self.reported).cloned() {
            self.reported = self.errors.len();
            return Err(err);
        }
        let expr = result?;
        debug!(loc = %expr.loc(), "parsed expression");
        self.next_token();
        Ok(expr)
    }

    /// Every error collected while advancing, including ones already
    /// returned from [`parse`](Self::parse).
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// `true` once the current token is end of input.
    pub fn is_at_end(&self) -> bool {
        self.cur_is(Tag::Eof)
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn peek(&self) -> &Token {
        &self.peek
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// The scanner's buffer; token `Loc`s index into it.
    pub fn source(&self) -> &str {
        self.scanner.source()
    }

    pub fn into_scanner(self) -> Scanner<R> {
        self.scanner
    }

    /// Slide the window one token to the right.
    fn next_token(&mut self) {
        let incoming = self.scanner.scan();
        self.current = std::mem::replace(&mut self.peek, incoming);
        trace!(
            current = %self.current.tag,
            peek = %self.peek.tag,
            "advance"
        );
        if self.peek.tag == Tag::Illegal {
            self.errors.push(ParseError::new(
                ParseErrorKind::InvalidToken,
                self.peek.pos.clone(),
            ));
        }
    }

    #[inline]
    fn cur_is(&self, tag: Tag) -> bool {
        self.current.is(tag)
    }

    #[inline]
    fn peek_is(&self, tag: Tag) -> bool {
        self.peek.is(tag)
    }

    /// Advance if the next token is `tag`, otherwise fail without moving.
    fn expect_peek(&mut self, tag: Tag) -> Result<(), ParseError> {
        if self.peek_is(tag) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: tag,
                    found: self.peek.tag,
                },
                self.peek.pos.clone(),
            ))
        }
    }

    fn error_at_current(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current.pos.clone())
    }

    /// Parse an expression whose infix operators all bind at least as
    /// tightly as `min`.
    fn parse_precedence(&mut self, min: Precedence) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_precedence_inner(min))
    }

    fn parse_precedence_inner(&mut self, min: Precedence) -> Result<Expr, ParseError> {
        debug!(?min, current = %self.current.tag, "parse_precedence");

        let Some(prefix) = self.rules.rule(self.current.tag).prefix else {
            return Err(self.error_at_current(ParseErrorKind::ExpectExpression));
        };
        let mut expr = self.run_prefix(prefix)?;

        loop {
            if self.peek_is(Tag::Eof) {
                break;
            }
            let rule = self.rules.rule(self.peek.tag);
            let Some(infix) = rule.infix else {
                break;
            };
            if rule.precedence == Precedence::None || rule.precedence < min {
                break;
            }
            self.next_token();
            expr = self.run_infix(infix, expr)?;
        }

        Ok(expr)
    }

    fn run_prefix(&mut self, prefix: Prefix) -> Result<Expr, ParseError> {
        match prefix {
            Prefix::Literal => self.literal(),
            Prefix::Identifier => Ok(self.identifier()),
            Prefix::Unary => self.unary(),
            Prefix::Grouping => self.grouping(),
        }
    }

    fn run_infix(&mut self, infix: Infix, lhs: Expr) -> Result<Expr, ParseError> {
        match infix {
            Infix::Binary => self.binary(lhs),
            Infix::Assign => self.assign(lhs),
            Infix::Call => self.call(lhs),
        }
    }
}
