//! Expression parser for Cinder.
//!
//! Table-driven precedence climbing: a [`RuleTable`] maps every token tag
//! to its prefix handler, infix handler and binding precedence, and the
//! [`Parser`] pulls tokens from a [`Scanner`](cinder_lexer::Scanner) one
//! at a time.

mod error;
mod parser;
mod rules;

pub use error::{ParseError, ParseErrorKind};
pub use parser::Parser;
pub use rules::{Infix, ParseRule, Prefix, RuleTable};

use cinder_ir::Expr;
use cinder_lexer::Scanner;

/// Parse a single expression from `source`.
pub fn parse_str(source: &str, filename: &str) -> Result<Expr, ParseError> {
    Parser::new(Scanner::from_source(source, filename)).parse()
}
