//! Normalizacja nicków.
//!
//! Dwie RÓŻNE reguły, nie łączyć ich w jedną:
//! - `normalize_for_comparison` – porównanie dwóch snapshotów z tego samego źródła,
//! - `normalize_for_identity` – dopasowanie nicku z rankingu do rejestru członków.

/// Małe litery, bez żadnych białych znaków (łącznie z BOM `U+FEFF`, który wkleja scraper).
///
/// `"  Test User  "` → `"testuser"`.
pub fn normalize_for_comparison(nick: &str) -> String {
    nick.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{FEFF}')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Małe litery, zostają wyłącznie znaki ASCII `[a-z0-9]`.
///
/// `"John_Doe-99"` → `"johndoe99"`.
pub fn normalize_for_identity(nick: &str) -> String {
    nick.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_strips_whitespace_and_case() {
        assert_eq!(normalize_for_comparison("  Test User  "), "testuser");
        assert_eq!(normalize_for_comparison("TESTUSER"), "testuser");
        assert_eq!(normalize_for_comparison("a\tb\nc\u{00A0}d"), "abcd");
        assert_eq!(normalize_for_comparison("\u{FEFF}Ace"), "ace");
        assert_eq!(normalize_for_comparison("A\u{FEFF}ce \u{FEFF}"), "ace");
    }

    #[test]
    fn comparison_keeps_punctuation_and_unicode() {
        assert_eq!(normalize_for_comparison("John_Doe-99"), "john_doe-99");
        assert_eq!(normalize_for_comparison("Łukasz ★"), "łukasz★");
    }

    #[test]
    fn identity_keeps_only_ascii_alphanumerics() {
        assert_eq!(normalize_for_identity("John_Doe-99"), "johndoe99");
        assert_eq!(normalize_for_identity("johndoe99"), "johndoe99");
        assert_eq!(normalize_for_identity("[ALL] Ace !"), "allace");
        // znaki spoza ASCII wypadają całkowicie
        assert_eq!(normalize_for_identity("Łukasz"), "ukasz");
    }

    #[test]
    fn both_rules_are_total() {
        assert_eq!(normalize_for_comparison(""), "");
        assert_eq!(normalize_for_identity(""), "");
        assert_eq!(normalize_for_identity("★★★"), "");
    }

    #[test]
    fn rules_disagree_on_punctuation() {
        let a = "Ace-1";
        let b = "Ace1";
        assert_ne!(normalize_for_comparison(a), normalize_for_comparison(b));
        assert_eq!(normalize_for_identity(a), normalize_for_identity(b));
    }
}
