//! Lexer for Cinder.
//!
//! Converts a byte stream into [`Token`](cinder_ir::Token)s on demand. The
//! scanner is pull-based: the parser asks for one token at a time and
//! nothing is buffered beyond one code point of pushback plus the short
//! peek needed for `...` and fractional numbers.
//!
//! ```text
//! let mut scanner = Scanner::from_source("x += 1", "main.cn");
//! scanner.scan();   // IDENT      "x"
//! scanner.scan();   // ADD_ASSIGN "+="
//! scanner.scan();   // INT        "1"
//! scanner.scan();   // EOF (and EOF forever after)
//! ```

pub mod char_source;
mod escape;
mod scanner;

pub use char_source::CharSource;
pub use scanner::{Scanner, DEFAULT_SIZE_HINT};
