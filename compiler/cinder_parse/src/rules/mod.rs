//! Token-tag to parse-rule mapping.
//!
//! Each tag owns at most one prefix handler (for tokens that begin an
//! expression), at most one infix handler (for tokens that continue one),
//! and the precedence at which the infix handler binds. Handlers are named
//! by enum rather than stored as function pointers so a table is plain
//! `Copy` data and can be built in a `const` context.

use cinder_ir::{Precedence, Tag};

/// Handler for a token that begins an expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// Numbers, strings, characters, `true`, `false`, `nil`.
    Literal,
    Identifier,
    /// `-x`, `!x`, `^x`.
    Unary,
    /// `( expr )`.
    Grouping,
}

/// Handler for a token that continues an expression already parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Infix {
    /// Left-associative binary operator.
    Binary,
    /// Right-associative assignment.
    Assign,
    /// `callee(args...)`.
    Call,
}

/// Per-tag parse rule.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParseRule {
    pub prefix: Option<Prefix>,
    pub infix: Option<Infix>,
    pub precedence: Precedence,
}

impl ParseRule {
    /// No handlers; the tag neither begins nor continues an expression.
    pub const NONE: ParseRule = ParseRule {
        prefix: None,
        infix: None,
        precedence: Precedence::None,
    };

    pub const fn prefix(prefix: Prefix) -> Self {
        ParseRule {
            prefix: Some(prefix),
            infix: None,
            precedence: Precedence::None,
        }
    }

    pub const fn infix(infix: Infix, precedence: Precedence) -> Self {
        ParseRule {
            prefix: None,
            infix: Some(infix),
            precedence,
        }
    }

    pub const fn both(prefix: Prefix, infix: Infix, precedence: Precedence) -> Self {
        ParseRule {
            prefix: Some(prefix),
            infix: Some(infix),
            precedence,
        }
    }
}

/// Fixed-size rule table indexed by [`Tag::index`].
///
/// Lookups never fail: a tag without a registered rule maps to
/// [`ParseRule::NONE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    rules: [ParseRule; Tag::COUNT],
}

/// Tags with a literal prefix handler.
const LITERALS: [Tag; 7] = [
    Tag::Int,
    Tag::Float,
    Tag::String,
    Tag::Char,
    Tag::True,
    Tag::False,
    Tag::Nil,
];

/// Tags with a binary infix handler. Precedence comes from
/// [`Tag::precedence`].
const BINARY: [Tag; 16] = [
    Tag::Lor,
    Tag::Land,
    Tag::Eql,
    Tag::Neq,
    Tag::Lss,
    Tag::Leq,
    Tag::Gtr,
    Tag::Geq,
    Tag::Add,
    Tag::Or,
    Tag::Mul,
    Tag::Quo,
    Tag::Rem,
    Tag::Shl,
    Tag::Shr,
    Tag::And,
];

impl RuleTable {
    /// A table with no rules at all.
    pub const fn empty() -> Self {
        RuleTable {
            rules: [ParseRule::NONE; Tag::COUNT],
        }
    }

    /// The full expression grammar.
    pub fn standard() -> Self {
        let mut table = RuleTable::empty();
        for tag in LITERALS {
            table.register(tag, ParseRule::prefix(Prefix::Literal));
        }
        table.register(Tag::Ident, ParseRule::prefix(Prefix::Identifier));
        table.register(Tag::Not, ParseRule::prefix(Prefix::Unary));
        // `-` and `^` are both unary and binary.
        table.register(
            Tag::Sub,
            ParseRule::both(Prefix::Unary, Infix::Binary, Precedence::Additive),
        );
        table.register(
            Tag::Xor,
            ParseRule::both(Prefix::Unary, Infix::Binary, Precedence::Additive),
        );
        table.register(
            Tag::Lparen,
            ParseRule::both(Prefix::Grouping, Infix::Call, Precedence::Call),
        );
        for tag in BINARY {
            table.register(tag, ParseRule::infix(Infix::Binary, tag.precedence()));
        }
        for tag in Tag::ALL.into_iter().filter(|tag| tag.is_assignment()) {
            table.register(tag, ParseRule::infix(Infix::Assign, Precedence::Assignment));
        }
        table
    }

    /// Install `rule` for `tag`, returning the rule it replaces.
    pub fn register(&mut self, tag: Tag, rule: ParseRule) -> ParseRule {
        std::mem::replace(&mut self.rules[tag.index()], rule)
    }

    #[inline]
    pub fn rule(&self, tag: Tag) -> ParseRule {
        self.rules[tag.index()]
    }

    /// Binding strength of `tag` as an infix operator.
    #[inline]
    pub fn precedence(&self, tag: Tag) -> Precedence {
        self.rules[tag.index()].precedence
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        RuleTable::standard()
    }
}
