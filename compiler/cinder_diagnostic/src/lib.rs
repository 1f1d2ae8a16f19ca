//! Diagnostics: a message anchored at an optional source position.
//!
//! This is the error surface handed to whatever drives the front end.
//! It renders in the conventional compiler shape:
//!
//! ```text
//! main.cn:3:14: Expect expression.
//! 3:14: invalid token          (no filename)
//! unexpected end of input      (no position)
//! ```

use std::fmt;

use cinder_ir::Position;

/// An error message with the position it refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    position: Option<Position>,
}

impl Diagnostic {
    /// A diagnostic at `position`.
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            position: Some(position),
        }
    }

    /// A diagnostic with no source position.
    pub fn bare(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            position: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(pos) = &self.position else {
            return f.write_str(&self.message);
        };

        let mut prefix = String::new();
        if !pos.filename.is_empty() {
            prefix.push_str(&pos.filename);
            prefix.push(':');
        }
        if pos.is_known() {
            prefix.push_str(&format!("{}:{}:", pos.line, pos.column));
        }

        if prefix.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{prefix} {}", self.message)
        }
    }
}

impl std::error::Error for Diagnostic {}
