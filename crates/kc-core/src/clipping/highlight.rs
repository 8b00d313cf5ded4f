//! Case-insensitive keyword matching for search results.

use regex::RegexBuilder;

pub fn contains_ignore_case(content: &str, query: &str) -> bool {
    content.to_lowercase().contains(&query.to_lowercase())
}

/// Wraps every case-insensitive occurrence of `query` in `<mark>` tags.
///
/// The query is matched literally. An empty query leaves `content` as is.
pub fn highlight_matches(content: &str, query: &str) -> String {
    if query.is_empty() {
        return content.to_string();
    }
    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.replace_all(content, "<mark>$0</mark>").into_owned(),
        Err(_) => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("The Quick Fox", "quick"));
        assert!(contains_ignore_case("the quick fox", "QUICK F"));
        assert!(!contains_ignore_case("the quick fox", "slow"));
    }

    #[test]
    fn test_highlight_keeps_original_casing() {
        assert_eq!(
            highlight_matches("Time and time again", "time"),
            "<mark>Time</mark> and <mark>time</mark> again"
        );
    }

    #[test]
    fn test_highlight_treats_query_literally() {
        assert_eq!(highlight_matches("cost (approx.) $5", "(approx.)"), "cost <mark>(approx.)</mark> $5");
        assert_eq!(highlight_matches("abc", "a.c"), "abc");
    }

    #[test]
    fn test_highlight_with_empty_query() {
        assert_eq!(highlight_matches("unchanged", ""), "unchanged");
    }
}
