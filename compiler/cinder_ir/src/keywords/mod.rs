//! Reserved-word resolution.
//!
//! The table is built once, on first lookup, from [`Tag::KEYWORDS`] plus the
//! two boolean literals, and is read-only afterwards. Lookup is exact and
//! case-sensitive; the scanner has already consumed the whole word.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::Tag;

static KEYWORDS: LazyLock<FxHashMap<&'static str, Tag>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    table.reserve(Tag::KEYWORDS.len() + 2);
    for tag in Tag::KEYWORDS.into_iter().chain([Tag::True, Tag::False]) {
        table.insert(tag.as_str(), tag);
    }
    table
});

/// Resolve identifier text to its tag: the keyword tag for a reserved word,
/// [`Tag::Ident`] otherwise.
#[inline]
pub fn lookup(word: &str) -> Tag {
    KEYWORDS.get(word).copied().unwrap_or(Tag::Ident)
}

/// `true` if `word` is reserved.
pub fn is_reserved(word: &str) -> bool {
    KEYWORDS.contains_key(word)
}
