use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Characters that may never appear as a key or substitution path segment.
pub static FORBIDDEN_CHARACTERS: Lazy<HashSet<char>> = Lazy::new(|| {
    [
        '$', '"', '{', '}', '[', ']', ':', '=', ',', '+', '#', '`', '^', '?', '!', '@', '*', '&',
        '\\', '(', ')',
    ]
    .into_iter()
    .collect()
});

pub fn is_forbidden(c: char) -> bool {
    FORBIDDEN_CHARACTERS.contains(&c)
}
