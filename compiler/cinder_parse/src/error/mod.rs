//! Parse errors.
//!
//! A [`ParseError`] pairs what went wrong ([`ParseErrorKind`]) with the
//! position of the token it was detected at, and renders as
//!
//! ```text
//! [line 3] Error at 14: Expect expression.
//! ```
//!
//! [`ParseError::to_diagnostic`] gives the `file:line:column: message`
//! form used by the rest of the front end.

use cinder_diagnostic::Diagnostic;
use cinder_ir::{Position, Tag};
use thiserror::Error;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The scanner produced an `Illegal` token.
    #[error("invalid token")]
    InvalidToken,

    /// A specific next token was required.
    #[error("Expected peek=\"{expected}\", got=\"{found}\"")]
    UnexpectedToken { expected: Tag, found: Tag },

    /// The current token cannot begin an expression.
    #[error("Expect expression.")]
    ExpectExpression,

    /// The left side of an assignment is not assignable.
    #[error("Invalid assignment target.")]
    InvalidAssignmentTarget,
}

/// A parse error at a source position.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("[line {}] Error at {}: {kind}", .pos.line, .pos.column)]
pub struct ParseError {
    kind: ParseErrorKind,
    pos: Position,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, pos: Position) -> Self {
        ParseError { kind, pos }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// The message without the position prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.pos.clone(), self.message())
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        err.to_diagnostic()
    }
}
