//! Cinder IR - shared front-end types.
//!
//! This crate holds the values passed between the scanner and the parser:
//! - [`Position`] and [`Loc`] for source locations
//! - [`Tag`], [`Precedence`] and [`Token`] for scanner output
//! - the reserved-word table ([`keywords::lookup`])
//! - the expression tree ([`Expr`]) built by the parser
//!
//! Nothing here owns source text. Tokens and tree nodes carry byte ranges
//! into the scanner's buffer and are resolved against it on demand.

pub mod ast;
pub mod keywords;
mod position;
mod token;

pub use ast::Expr;
pub use position::{Loc, Position};
pub use token::{Precedence, Tag, Token};
