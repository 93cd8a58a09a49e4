//! Count-plus-noun phrases for log lines.

/// `"1 asset"`, `"3 assets"`: plural formed by appending `s`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Like [`plural_count`], for nouns with an irregular plural
/// (`capability` / `capabilities`).
#[inline]
pub fn plural_count_with(count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{count} {noun}")
}
