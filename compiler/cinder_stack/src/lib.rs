//! Stack growth for Cinder's recursive passes.
//!
//! Each level of a nested expression such as `((((1))))` or `- - - - 1`
//! costs one `parse_precedence` frame in the parser and one `fmt_prefix`
//! frame when the tree is printed. Both recursions go through
//! [`ensure_sufficient_stack`], which moves onto a fresh heap segment when
//! the current one runs low.

/// Grow once less than this much stack remains (64 KiB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each segment allocated on growth (1 MiB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f` with at least 64 KiB of stack available, allocating a new
/// segment first if the current one is nearly exhausted.
///
/// ```text
/// fn parse_precedence(&mut self, min: Precedence) -> Result<Expr, ParseError> {
///     ensure_sufficient_stack(|| self.parse_precedence_inner(min))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
