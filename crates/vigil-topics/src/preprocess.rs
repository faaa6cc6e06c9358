//! Text normalization applied before tokenization.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lowercase, decompose, drop combining marks, and blank out anything that is
/// not `[a-z0-9]` or whitespace.
///
/// ```
/// use vigil_topics::normalize_text;
///
/// assert_eq!(normalize_text("Insuficiência Cardíaca!"), "insuficiencia cardiaca");
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    folded.trim().to_string()
}

/// Whitespace tokens of the normalized text, keeping tokens of two or more characters.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split_whitespace()
        .filter(|t| t.len() >= 2)
        .map(str::to_string)
        .collect()
}
