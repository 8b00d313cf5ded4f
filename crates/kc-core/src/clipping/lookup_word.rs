//! Picks the dictionary lookup word out of a single-word clipping.

use super::inflect;

/// Characters highlighted together with a single word that must not reach
/// the definition provider.
pub const STRIPPED_CHARS: &[char] = &[
    '.', ',', '!', ';', ':', '\'', '"', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '(', ')',
];

/// A clipping is eligible for a definition only when it is one token.
pub fn is_single_token(content: &str) -> bool {
    content.split_whitespace().count() == 1
}

/// Returns the normalized lookup word for `content`, or `None` when the
/// clipping is not eligible for a definition.
///
/// Punctuation and quotes are stripped, the word is lower-cased, and plural
/// nouns are singularized since plural definitions are rarely useful.
pub fn lookup_word(content: &str) -> Option<String> {
    if !is_single_token(content) {
        return None;
    }

    let stripped: String = content
        .trim()
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();
    if stripped.is_empty() {
        return None;
    }

    let word = stripped.to_lowercase();
    if inflect::is_plural(&word) {
        Some(inflect::singularize(&word))
    } else {
        Some(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_singularizes() {
        assert_eq!(lookup_word("cats."), Some("cat".to_string()));
        assert_eq!(lookup_word("\u{201C}berries,\u{201D}"), Some("berry".to_string()));
        assert_eq!(lookup_word("(wolves)!"), Some("wolf".to_string()));
    }

    #[test]
    fn test_singular_word_is_only_lowercased() {
        assert_eq!(lookup_word("Serendipity"), Some("serendipity".to_string()));
        assert_eq!(lookup_word("  ineffable  "), Some("ineffable".to_string()));
    }

    #[test]
    fn test_multi_word_content_is_never_eligible() {
        assert_eq!(lookup_word("two words"), None);
        assert_eq!(lookup_word("It was the best of times."), None);
        assert_eq!(lookup_word("tab\tseparated"), None);
    }

    #[test]
    fn test_empty_or_punctuation_only_is_not_eligible() {
        assert_eq!(lookup_word(""), None);
        assert_eq!(lookup_word("   "), None);
        assert_eq!(lookup_word("..."), None);
    }
}
