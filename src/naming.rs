//! Type name normalization
//!
//! Connector-native type names (`int4`, `timestamp with time zone`) and
//! locally declared names (`Int4`, `TimestampWithTimeZone!`) live in
//! different namespaces. Two names refer to the same type iff their
//! [`comparison_key`]s are equal and non-empty. Generated document names
//! go through [`sanitize_identifier`] so they are valid GraphQL names.

use regex::Regex;
use std::sync::LazyLock;

/// Identifier used when sanitization leaves nothing behind
pub const UNKNOWN_IDENTIFIER: &str = "_Unknown";

/// Word separators for [`capitalize_words`]: underscore or any whitespace
static WORD_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[_\s]").unwrap());

/// Comparison key: ASCII letters and digits only, lower-cased
pub fn comparison_key(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Strip everything outside `[A-Za-z0-9_]` and make the result start with
/// a letter or underscore
pub fn sanitize_identifier(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    match sanitized.chars().next() {
        None => UNKNOWN_IDENTIFIER.to_string(),
        Some(first) if first.is_ascii_alphabetic() || first == '_' => sanitized,
        Some(_) => format!("_{sanitized}"),
    }
}

/// Upper-case the first character, leave the rest untouched
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split on underscores/whitespace and capitalize each segment:
/// `album_tracks` -> `AlbumTracks`
pub fn capitalize_words(name: &str) -> String {
    WORD_SEPARATOR.split(name).map(capitalize_first).collect()
}

/// Name used for generated documents derived from `name`
pub fn display_name(name: &str) -> String {
    sanitize_identifier(&capitalize_words(name))
}

/// Drop the non-null marker: `String!` -> `String`
pub fn strip_non_null(type_name: &str) -> &str {
    type_name.trim().trim_end_matches('!')
}

/// Whether a field type is a list type, `[Track!]` or `[Track!]!`
pub fn is_array_type(type_name: &str) -> bool {
    let inner = strip_non_null(type_name);
    inner.starts_with('[') && inner.ends_with(']')
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Int32", "int32" ; "plain")]
    #[test_case("String!", "string" ; "non null")]
    #[test_case("timestamp with time zone", "timestampwithtimezone" ; "spaces")]
    #[test_case("album_tracks", "albumtracks" ; "underscores")]
    #[test_case("[Track!]", "track" ; "brackets")]
    #[test_case("", "" ; "empty")]
    #[test_case("日付", "" ; "non ascii only")]
    fn test_comparison_key(input: &str, expected: &str) {
        assert_eq!(comparison_key(input), expected);
    }

    #[test_case("Int32", "Int32" ; "already valid")]
    #[test_case("my-type", "mytype" ; "dash removed")]
    #[test_case("2fa", "_2fa" ; "leading digit")]
    #[test_case("_private", "_private" ; "leading underscore")]
    #[test_case("timestamp with time zone", "timestampwithtimezone" ; "spaces removed")]
    #[test_case("!!!", "_Unknown" ; "nothing left")]
    #[test_case("", "_Unknown" ; "empty")]
    fn test_sanitize_identifier(input: &str, expected: &str) {
        assert_eq!(sanitize_identifier(input), expected);
    }

    #[test_case("album", "Album" ; "single word")]
    #[test_case("album_tracks", "AlbumTracks" ; "snake case")]
    #[test_case("timestamp with time zone", "TimestampWithTimeZone" ; "spaces")]
    #[test_case("AlbumTracks", "AlbumTracks" ; "already capitalized")]
    #[test_case("a__b", "AB" ; "repeated separator")]
    #[test_case("", "" ; "empty")]
    fn test_capitalize_words(input: &str, expected: &str) {
        assert_eq!(capitalize_words(input), expected);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("chinook"), "Chinook");
        assert_eq!(capitalize_first("myApp"), "MyApp");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("album_tracks"), "AlbumTracks");
        assert_eq!(display_name("2024 sales"), "_2024Sales");
        assert_eq!(display_name("--"), "_Unknown");
    }

    #[test]
    fn test_type_helpers() {
        assert_eq!(strip_non_null("String!"), "String");
        assert_eq!(strip_non_null(" Int "), "Int");
        assert!(is_array_type("[String!]"));
        assert!(is_array_type("[Track!]!"));
        assert!(!is_array_type("String"));
        assert!(!is_array_type("Track!"));
    }
}
