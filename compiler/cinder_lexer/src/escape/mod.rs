//! Escape sequences in double-quoted strings.
//!
//! Recognized escapes: `\n`, `\t`, `\"`, `\\`. Anything else after a
//! backslash is kept as written.
//!
//! The scanner rewrites a recognized escape in place: the escape letter in
//! the buffer is replaced by the character it denotes, and the backslash is
//! left where it is so buffer offsets keep matching input offsets. The
//! literal's value is carried on the token.

/// The character a recognized escape letter denotes.
#[inline]
pub(crate) fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}
