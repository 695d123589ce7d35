//! Filesystem-safe identifiers derived from free-text titles.

/// Derives the identifier used for directory names, file base names and
/// channel filter matching.
///
/// - Collapses each run of whitespace into a single `_`
/// - Drops every character outside ASCII letters, digits, `_` and `-`
/// - Lowercases the result
///
/// Lossy and non-injective: distinct titles may map to the same identifier,
/// and a title made only of dropped characters maps to the empty string.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c.to_ascii_lowercase());
        }
    }

    out
}
