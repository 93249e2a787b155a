//! Canonical identifiers for concept nodes.
//!
//! Display strings (street names, addresses, synthetic labels) are turned
//! into lowercase ASCII slugs so the same display string always resolves to
//! the same node.

use deunicode::deunicode_char;

/// Separator placed between alphanumeric runs
pub const SEPARATOR: char = '-';

/// Identifier used when a display string has no alphanumeric content
pub const FALLBACK_IDENTIFIER: &str = "unnamed";

/// Identifier of the street node for edges without a name. [`normalize`]
/// never emits `_`, so no named street can resolve to it.
pub const UNNAMED_STREET_IDENTIFIER: &str = "unnamed_street";

/// Lowercase ASCII slug of `input`.
///
/// Non-ASCII characters are transliterated and every run of
/// non-alphanumeric characters becomes a single [`SEPARATOR`]. Quotes that
/// only appear through transliteration (typographic apostrophes) are
/// dropped. Leading and trailing separators are trimmed.
/// `normalize(normalize(x)) == normalize(x)` for every input.
pub fn normalize(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars() {
        if ch.is_ascii() {
            push_ascii(&mut slug, &mut pending_separator, ch);
            continue;
        }
        match deunicode_char(ch) {
            Some(ascii) => {
                for ch in ascii.chars().filter(|ch| !matches!(ch, '\'' | '"' | '`')) {
                    push_ascii(&mut slug, &mut pending_separator, ch);
                }
            }
            None => pending_separator = true,
        }
    }

    slug
}

fn push_ascii(slug: &mut String, pending_separator: &mut bool, ch: char) {
    if ch.is_ascii_alphanumeric() {
        if *pending_separator && !slug.is_empty() {
            slug.push(SEPARATOR);
        }
        *pending_separator = false;
        slug.push(ch.to_ascii_lowercase());
    } else {
        *pending_separator = true;
    }
}

/// Node identifier for a display string; never empty
pub fn identifier(display: &str) -> String {
    let slug = normalize(display);
    if slug.is_empty() {
        FALLBACK_IDENTIFIER.to_string()
    } else {
        slug
    }
}

/// Synthetic label of the length fact attached to a street
pub fn length_label(total_length: u64) -> String {
    format!("length_{total_length}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_and_punctuation_insensitive() {
        assert_eq!(normalize("Main St."), normalize("main st"));
        assert_eq!(normalize("Main St."), "main-st");
        assert_eq!(normalize("  --Main___St--  "), "main-st");
    }

    #[test]
    fn transliterates_non_ascii() {
        assert_eq!(normalize("Café Straße"), "cafe-strasse");
        assert_eq!(normalize("Crème Brûlée"), normalize("creme brulee"));
        let cyrillic = normalize("улица Гикало");
        assert!(!cyrillic.is_empty());
        assert!(cyrillic.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn ascii_quotes_separate() {
        assert_eq!(normalize("O'Connell Street"), "o-connell-street");
        assert_eq!(normalize("\"Main\" `St`"), "main-st");
        assert_ne!(normalize("O'Connell Street"), normalize("Oconnell Street"));
    }

    #[test]
    fn transliterated_quotes_are_dropped() {
        assert_eq!(normalize("O’Connell Street"), "oconnell-street");
    }

    #[test]
    fn named_streets_never_take_the_unnamed_identifier() {
        for name in ["Unnamed", "unnamed street", "Unnamed_Street", "..."] {
            assert_ne!(identifier(name), UNNAMED_STREET_IDENTIFIER, "name: {name:?}");
        }
    }

    #[test]
    fn idempotent() {
        for input in [
            "Main St.",
            "length_450",
            "5, Platonova Street, Minsk, 220005, Belarus",
            "проспект Независимости",
            "Ærøskøbing — Østergade",
            "",
            "!!!",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn length_labels() {
        assert_eq!(length_label(450), "length_450");
        assert_eq!(identifier(&length_label(450)), "length-450");
    }

    #[test]
    fn empty_slug_falls_back() {
        assert_eq!(normalize("..."), "");
        assert_eq!(identifier("..."), FALLBACK_IDENTIFIER);
        assert_eq!(identifier("Main"), "main");
    }
}
