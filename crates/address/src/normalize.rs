//! Text folding for matching Portuguese place names.
//!
//! Geocoders are inconsistent about diacritics ("São Paulo" vs "Sao Paulo"),
//! so every comparison in this crate runs on folded text:
//! - Unicode NFD decomposition
//! - Combining marks dropped
//! - Lowercase conversion

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase and strip diacritics.
///
/// ```
/// use qservicos_address::normalize::fold;
///
/// assert_eq!(fold("São Paulo"), "sao paulo");
/// assert_eq!(fold("GOIÂNIA"), "goiania");
/// ```
pub fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split folded text into alphanumeric tokens.
pub fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty())
}

/// True when `needle` occurs in `haystack` delimited by non-alphanumerics
/// (or the ends of the string). Both sides are expected to be folded.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// True when the text has at least one alphabetic character.
pub fn has_letters(s: &str) -> bool {
    s.chars().any(char::is_alphabetic)
}

/// Drop a trailing country name ("..., Brasil" / "... Brasil") from a segment.
/// `countries` must be folded. Returns the folded remainder.
pub fn strip_country_suffix(segment: &str, countries: &[String]) -> String {
    let folded = fold(segment);
    let trimmed = folded.trim_end();
    for country in countries {
        if let Some(rest) = trimmed.strip_suffix(country.as_str()) {
            let boundary = rest.chars().next_back().map_or(true, |c| !c.is_alphanumeric());
            if boundary {
                return rest.trim_end_matches(|c: char| c == ',' || c.is_whitespace()).to_string();
            }
        }
    }
    trimmed.to_string()
}
