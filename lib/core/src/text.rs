//! Word splitting shared by normalization, ids and derived embeddings

/// Separator set used for word splitting
///
/// Unicode `White_Space` without NEL (U+0085), plus the byte order mark
/// (U+FEFF).
#[inline]
pub fn is_separator(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Non-empty runs of text between separators
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|w| !w.is_empty())
}
