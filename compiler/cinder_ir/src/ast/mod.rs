//! Expression tree produced by the parser.
//!
//! Literal and identifier nodes keep their text (copied out of the scanner
//! buffer when the node is built), so a tree stays usable after the scanner
//! that produced it is gone. Every node records the [`Loc`] it covers.
//!
//! `Display` prints a fully parenthesized prefix form:
//!
//! ```text
//! 1 + 2 * 3      =>  (+ 1 (* 2 3))
//! a = -f(x, 1)   =>  (= a (- (call f x 1)))
//! ```

use std::fmt;

use cinder_stack::ensure_sufficient_stack;

use crate::{Loc, Tag};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Int {
        text: String,
        loc: Loc,
    },
    Float {
        text: String,
        loc: Loc,
    },
    Str {
        text: String,
        loc: Loc,
    },
    Char {
        text: String,
        loc: Loc,
    },
    Bool {
        value: bool,
        loc: Loc,
    },
    Nil {
        loc: Loc,
    },
    Ident {
        name: String,
        loc: Loc,
    },
    Unary {
        op: Tag,
        operand: Box<Expr>,
        loc: Loc,
    },
    Binary {
        op: Tag,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        loc: Loc,
    },
    Grouping {
        inner: Box<Expr>,
        loc: Loc,
    },
    /// `target op value` where `op` is `=`, `:=` or a compound assignment.
    Assign {
        op: Tag,
        target: Box<Expr>,
        value: Box<Expr>,
        loc: Loc,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        loc: Loc,
    },
}

impl Expr {
    /// Source range covered by the node.
    pub fn loc(&self) -> Loc {
        match self {
            Expr::Int { loc, .. }
            | Expr::Float { loc, .. }
            | Expr::Str { loc, .. }
            | Expr::Char { loc, .. }
            | Expr::Bool { loc, .. }
            | Expr::Nil { loc }
            | Expr::Ident { loc, .. }
            | Expr::Unary { loc, .. }
            | Expr::Binary { loc, .. }
            | Expr::Grouping { loc, .. }
            | Expr::Assign { loc, .. }
            | Expr::Call { loc, .. } => *loc,
        }
    }

    /// `true` for nodes that may appear on the left of an assignment.
    pub fn is_assignable(&self) -> bool {
        matches!(self, Expr::Ident { .. })
    }

    /// Number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(expr) = pending.pop() {
            count += 1;
            match expr {
                Expr::Int { .. }
                | Expr::Float { .. }
                | Expr::Str { .. }
                | Expr::Char { .. }
                | Expr::Bool { .. }
                | Expr::Nil { .. }
                | Expr::Ident { .. } => {}
                Expr::Unary { operand: child, .. } | Expr::Grouping { inner: child, .. } => {
                    pending.push(child);
                }
                Expr::Binary { lhs, rhs, .. }
                | Expr::Assign {
                    target: lhs,
                    value: rhs,
                    ..
                } => {
                    pending.push(lhs);
                    pending.push(rhs);
                }
                Expr::Call { callee, args, .. } => {
                    pending.push(callee);
                    pending.extend(args);
                }
            }
        }
        count
    }

    /// Move the direct children into `out`, leaving `Nil` leaves behind.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            Expr::Int { .. }
            | Expr::Float { .. }
            | Expr::Str { .. }
            | Expr::Char { .. }
            | Expr::Bool { .. }
            | Expr::Nil { .. }
            | Expr::Ident { .. } => {}
            Expr::Unary { operand: child, .. } | Expr::Grouping { inner: child, .. } => {
                out.push(take(child));
            }
            Expr::Binary { lhs, rhs, .. }
            | Expr::Assign {
                target: lhs,
                value: rhs,
                ..
            } => {
                out.push(take(lhs));
                out.push(take(rhs));
            }
            Expr::Call { callee, args, .. } => {
                out.push(take(callee));
                out.append(args);
            }
        }
    }
}

fn take(slot: &mut Expr) -> Expr {
    std::mem::replace(slot, Expr::Nil { loc: Loc::default() })
}

/// Trees nested tens of thousands deep are legal parser output, so they are
/// torn down with a work-list instead of recursive drop glue.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut child) = pending.pop() {
            child.detach_children(&mut pending);
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.fmt_prefix(f))
    }
}

impl Expr {
    fn fmt_prefix(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int { text, .. } | Expr::Float { text, .. } => f.write_str(text),
            Expr::Str { text, .. } => write!(f, "{text:?}"),
            Expr::Char { text, .. } => write!(f, "'{text}'"),
            Expr::Bool { value, .. } => write!(f, "{value}"),
            Expr::Nil { .. } => f.write_str("nil"),
            Expr::Ident { name, .. } => f.write_str(name),
            Expr::Unary { op, operand, .. } => write!(f, "({op} {operand})"),
            Expr::Binary { op, lhs, rhs, .. } => write!(f, "({op} {lhs} {rhs})"),
            Expr::Grouping { inner, .. } => write!(f, "(group {inner})"),
            Expr::Assign {
                op, target, value, ..
            } => write!(f, "({op} {target} {value})"),
            Expr::Call { callee, args, .. } => {
                write!(f, "(call {callee}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
