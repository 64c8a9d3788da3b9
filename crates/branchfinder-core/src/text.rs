// crates/branchfinder-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Ọyọ` -> `Oyo`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use branchfinder_core::text::fold_key;
///
/// assert_eq!(fold_key("Ọyọ"), "oyo");
/// assert_eq!(fold_key("LAGOS"), "lagos");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Normalizes a free-text query: folded, trimmed, inner whitespace collapsed.
///
/// ```rust
/// use branchfinder_core::text::normalize_query;
///
/// assert_eq!(normalize_query("  Lagos   Main "), "lagos main");
/// ```
pub fn normalize_query(q: &str) -> String {
    collapse_ws(&fold_key(q))
}

/// Builds the normalized text key of a row from its field values, in column order.
///
/// Empty values are skipped so that missing cells do not leave double spaces.
pub fn row_key<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(normalize_query)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compares two strings for equality after folding and trimming.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a.trim()) == fold_key(b.trim())
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
