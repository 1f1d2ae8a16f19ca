//! Token vocabulary.
//!
//! [`Tag`] is the closed set of lexical categories the scanner can report.
//! Discriminants are contiguous from zero so tables indexed by tag (the
//! parser's rule table) can be plain arrays of [`Tag::COUNT`] entries.

use std::fmt;
use std::sync::Arc;

use crate::{Loc, Position};

/// Lexical category of a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Tag {
    // Special tokens
    Illegal,
    Eof,
    Comment,

    // Identifiers and basic literal classes
    Ident,
    Int,
    Float,
    Char,
    String,

    // Boolean literals
    True,
    False,

    // Operators
    Add,
    Sub,
    Mul,
    Quo,
    Rem,

    And,
    Or,
    Xor,
    Shl,
    Shr,

    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,

    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,

    Land,
    Lor,
    Arrow,
    Inc,
    Dec,

    Eql,
    Lss,
    Gtr,
    Assign,
    Not,

    Neq,
    Leq,
    Geq,
    Define,
    Ellipsis,

    // Delimiters
    Lparen,
    Lbrack,
    Lbrace,
    Comma,
    Period,

    Rparen,
    Rbrack,
    Rbrace,
    Semicolon,
    Colon,

    // Keywords
    Nil,
    Break,
    Const,
    Continue,

    Else,
    For,
    While,

    Func,
    If,

    Return,

    Class,
    Var,
}

impl Tag {
    /// Every tag, in discriminant order.
    pub const ALL: [Tag; 67] = [
        Tag::Illegal,
        Tag::Eof,
        Tag::Comment,
        Tag::Ident,
        Tag::Int,
        Tag::Float,
        Tag::Char,
        Tag::String,
        Tag::True,
        Tag::False,
        Tag::Add,
        Tag::Sub,
        Tag::Mul,
        Tag::Quo,
        Tag::Rem,
        Tag::And,
        Tag::Or,
        Tag::Xor,
        Tag::Shl,
        Tag::Shr,
        Tag::AddAssign,
        Tag::SubAssign,
        Tag::MulAssign,
        Tag::QuoAssign,
        Tag::RemAssign,
        Tag::AndAssign,
        Tag::OrAssign,
        Tag::XorAssign,
        Tag::ShlAssign,
        Tag::ShrAssign,
        Tag::Land,
        Tag::Lor,
        Tag::Arrow,
        Tag::Inc,
        Tag::Dec,
        Tag::Eql,
        Tag::Lss,
        Tag::Gtr,
        Tag::Assign,
        Tag::Not,
        Tag::Neq,
        Tag::Leq,
        Tag::Geq,
        Tag::Define,
        Tag::Ellipsis,
        Tag::Lparen,
        Tag::Lbrack,
        Tag::Lbrace,
        Tag::Comma,
        Tag::Period,
        Tag::Rparen,
        Tag::Rbrack,
        Tag::Rbrace,
        Tag::Semicolon,
        Tag::Colon,
        Tag::Nil,
        Tag::Break,
        Tag::Const,
        Tag::Continue,
        Tag::Else,
        Tag::For,
        Tag::While,
        Tag::Func,
        Tag::If,
        Tag::Return,
        Tag::Class,
        Tag::Var,
    ];

    /// Number of tags.
    pub const COUNT: usize = Tag::ALL.len();

    /// Reserved words, resolved from identifier text by [`crate::keywords::lookup`].
    pub const KEYWORDS: [Tag; 12] = [
        Tag::Nil,
        Tag::Break,
        Tag::Const,
        Tag::Continue,
        Tag::Else,
        Tag::For,
        Tag::While,
        Tag::Func,
        Tag::If,
        Tag::Return,
        Tag::Class,
        Tag::Var,
    ];

    /// Ordinal of the tag, usable as an array index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display text: the fixed lexeme for operators, delimiters and keywords,
    /// the class name for literal classes and sentinels.
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::Illegal => "ILLEGAL",
            Tag::Eof => "EOF",
            Tag::Comment => "COMMENT",

            Tag::Ident => "IDENT",
            Tag::Int => "INT",
            Tag::Float => "FLOAT",
            Tag::Char => "CHAR",
            Tag::String => "STRING",

            Tag::True => "true",
            Tag::False => "false",

            Tag::Add => "+",
            Tag::Sub => "-",
            Tag::Mul => "*",
            Tag::Quo => "/",
            Tag::Rem => "%",

            Tag::And => "&",
            Tag::Or => "|",
            Tag::Xor => "^",
            Tag::Shl => "<<",
            Tag::Shr => ">>",

            Tag::AddAssign => "+=",
            Tag::SubAssign => "-=",
            Tag::MulAssign => "*=",
            Tag::QuoAssign => "/=",
            Tag::RemAssign => "%=",

            Tag::AndAssign => "&=",
            Tag::OrAssign => "|=",
            Tag::XorAssign => "^=",
            Tag::ShlAssign => "<<=",
            Tag::ShrAssign => ">>=",

            Tag::Land => "&&",
            Tag::Lor => "||",
            Tag::Arrow => "<-",
            Tag::Inc => "++",
            Tag::Dec => "--",

            Tag::Eql => "==",
            Tag::Lss => "<",
            Tag::Gtr => ">",
            Tag::Assign => "=",
            Tag::Not => "!",

            Tag::Neq => "!=",
            Tag::Leq => "<=",
            Tag::Geq => ">=",
            Tag::Define => ":=",
            Tag::Ellipsis => "...",

            Tag::Lparen => "(",
            Tag::Lbrack => "[",
            Tag::Lbrace => "{",
            Tag::Comma => ",",
            Tag::Period => ".",

            Tag::Rparen => ")",
            Tag::Rbrack => "]",
            Tag::Rbrace => "}",
            Tag::Semicolon => ";",
            Tag::Colon => ":",

            Tag::Nil => "nil",
            Tag::Break => "break",
            Tag::Const => "const",
            Tag::Continue => "continue",

            Tag::Else => "else",
            Tag::For => "for",
            Tag::While => "while",

            Tag::Func => "func",
            Tag::If => "if",

            Tag::Return => "return",

            Tag::Class => "class",
            Tag::Var => "var",
        }
    }

    /// `true` for reserved words.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Tag::Nil
                | Tag::Break
                | Tag::Const
                | Tag::Continue
                | Tag::Else
                | Tag::For
                | Tag::While
                | Tag::Func
                | Tag::If
                | Tag::Return
                | Tag::Class
                | Tag::Var
        )
    }

    /// `true` for tags whose lexeme is a literal value.
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Tag::Int | Tag::Float | Tag::Char | Tag::String | Tag::True | Tag::False | Tag::Nil
        )
    }

    /// `true` for operator tags (`+` through `...`).
    pub const fn is_operator(self) -> bool {
        let i = self as u8;
        i >= Tag::Add as u8 && i <= Tag::Ellipsis as u8
    }

    /// `true` for `=`, `:=` and the compound assignments.
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            Tag::Assign
                | Tag::Define
                | Tag::AddAssign
                | Tag::SubAssign
                | Tag::MulAssign
                | Tag::QuoAssign
                | Tag::RemAssign
                | Tag::AndAssign
                | Tag::OrAssign
                | Tag::XorAssign
                | Tag::ShlAssign
                | Tag::ShrAssign
        )
    }

    /// Binding strength of the tag used as a binary operator.
    ///
    /// Tags that are not binary operators return [`Precedence::None`], which
    /// ends expression recognition.
    pub const fn precedence(self) -> Precedence {
        match self {
            Tag::Assign
            | Tag::Define
            | Tag::AddAssign
            | Tag::SubAssign
            | Tag::MulAssign
            | Tag::QuoAssign
            | Tag::RemAssign
            | Tag::AndAssign
            | Tag::OrAssign
            | Tag::XorAssign
            | Tag::ShlAssign
            | Tag::ShrAssign => Precedence::Assignment,
            Tag::Lor => Precedence::LogicalOr,
            Tag::Land => Precedence::LogicalAnd,
            Tag::Eql | Tag::Neq | Tag::Lss | Tag::Leq | Tag::Gtr | Tag::Geq => {
                Precedence::Comparison
            }
            Tag::Add | Tag::Sub | Tag::Or | Tag::Xor => Precedence::Additive,
            Tag::Mul | Tag::Quo | Tag::Rem | Tag::Shl | Tag::Shr | Tag::And => {
                Precedence::Multiplicative
            }
            _ => Precedence::None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binding strength, lowest to highest.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Precedence {
    #[default]
    None,
    Assignment,
    LogicalOr,
    LogicalAnd,
    /// `== != < <= > >=`
    Comparison,
    /// `+ - | ^`
    Additive,
    /// `* / % << >> &`
    Multiplicative,
    Unary,
    Call,
    Primary,
}

impl Precedence {
    /// One level tighter; `Primary` saturates.
    ///
    /// Parsing a right operand at `op.next()` makes operators of equal
    /// strength associate to the left.
    #[must_use]
    pub const fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::Comparison,
            Precedence::Comparison => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary => Precedence::Call,
            Precedence::Call | Precedence::Primary => Precedence::Primary,
        }
    }
}

/// A classified lexeme.
///
/// The token's text stays in the scanner's buffer; [`Token::lexeme`] slices
/// it out. `pos` is the position of the lexeme's first byte. String tokens
/// also carry their `value`: escapes resolved for double-quoted strings, the
/// text as written for backtick strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub tag: Tag,
    pub loc: Loc,
    pub pos: Position,
    pub value: Option<Arc<str>>,
}

impl Token {
    pub fn new(tag: Tag, loc: Loc, pos: Position) -> Self {
        Token {
            tag,
            loc,
            pos,
            value: None,
        }
    }

    /// Attach a literal value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Arc<str>>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// The token's text within `source`.
    ///
    /// Returns an empty string if `source` is not the buffer the token was
    /// scanned from and the range does not fit.
    pub fn lexeme<'s>(&self, source: &'s str) -> &'s str {
        self.loc.slice(source).unwrap_or_default()
    }

    /// Literal value of a string token.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Byte offset just past the lexeme.
    #[inline]
    pub fn end_offset(&self) -> usize {
        self.loc.end
    }

    #[inline]
    pub fn is(&self, tag: Tag) -> bool {
        self.tag == tag
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::new(Tag::Eof, Loc::default(), Position::default())
    }
}
