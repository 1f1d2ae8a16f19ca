//! Prefix and infix handlers.
//!
//! A handler is entered with its triggering token as `current` and returns
//! with the last token of the node it built as `current`.

use std::io::Read;

use cinder_ir::{Expr, Loc, Precedence, Tag};
use tracing::trace;

use super::Parser;
use crate::{ParseError, ParseErrorKind};

impl<R: Read> Parser<R> {
    fn current_text(&self) -> String {
        self.current.lexeme(self.scanner.source()).to_owned()
    }

    pub(super) fn literal(&self) -> Result<Expr, ParseError> {
        let loc = self.current.loc;
        let expr = match self.current.tag {
            Tag::Int => Expr::Int {
                text: self.current_text(),
                loc,
            },
            Tag::Float => Expr::Float {
                text: self.current_text(),
                loc,
            },
            Tag::String => Expr::Str {
                text: self.current.value().unwrap_or_default().to_owned(),
                loc,
            },
            Tag::Char => Expr::Char {
                text: self.current_text(),
                loc,
            },
            Tag::True => Expr::Bool { value: true, loc },
            Tag::False => Expr::Bool { value: false, loc },
            Tag::Nil => Expr::Nil { loc },
            _ => return Err(self.error_at_current(ParseErrorKind::ExpectExpression)),
        };
        Ok(expr)
    }

    pub(super) fn identifier(&self) -> Expr {
        Expr::Ident {
            name: self.current_text(),
            loc: self.current.loc,
        }
    }

    pub(super) fn unary(&mut self) -> Result<Expr, ParseError> {
        let op = self.current.tag;
        let start = self.current.loc.start;
        self.next_token();
        let operand = self.parse_precedence(Precedence::Unary)?;
        let loc = Loc::new(start, operand.loc().end);
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            loc,
        })
    }

    pub(super) fn grouping(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.loc.start;
        self.next_token();
        let inner = self.parse_precedence(Precedence::Assignment)?;
        self.expect_peek(Tag::Rparen)?;
        Ok(Expr::Grouping {
            inner: Box::new(inner),
            loc: Loc::new(start, self.current.loc.end),
        })
    }

    pub(super) fn binary(&mut self, lhs: Expr) -> Result<Expr, ParseError> {
        let op = self.current.tag;
        let precedence = self.rules.precedence(op);
        trace!(%op, ?precedence, "binary");
        self.next_token();
        // One level tighter on the right: `a - b - c` is `(a - b) - c`.
        let rhs = self.parse_precedence(precedence.next())?;
        let loc = lhs.loc().merge(rhs.loc());
        Ok(Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            loc,
        })
    }

    pub(super) fn assign(&mut self, target: Expr) -> Result<Expr, ParseError> {
        let op = self.current.tag;
        if !target.is_assignable() {
            return Err(self.error_at_current(ParseErrorKind::InvalidAssignmentTarget));
        }
        self.next_token();
        // Same level on the right: `a = b = c` is `a = (b = c)`.
        let value = self.parse_precedence(Precedence::Assignment)?;
        let loc = target.loc().merge(value.loc());
        Ok(Expr::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
            loc,
        })
    }

    pub(super) fn call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        let mut args = Vec::new();
        if self.peek_is(Tag::Rparen) {
            self.next_token();
        } else {
            self.next_token();
            args.push(self.parse_precedence(Precedence::Assignment)?);
            while self.peek_is(Tag::Comma) {
                self.next_token();
                self.next_token();
                args.push(self.parse_precedence(Precedence::Assignment)?);
            }
            self.expect_peek(Tag::Rparen)?;
        }
        let loc = Loc::new(callee.loc().start, self.current.loc.end);
        Ok(Expr::Call {
            callee: Box::new(callee),
            args,
            loc,
        })
    }
}
