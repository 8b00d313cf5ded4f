//! Alphabetical shelving of resolved books.

use std::collections::BTreeMap;

use super::model::BookSummary;

/// Bucket label shared by every title starting with a digit.
pub const DIGIT_BUCKET: &str = "0-9";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfBucket {
    pub label: String,
    pub books: Vec<BookSummary>,
}

/// Title used for grouping and ordering: a leading `"The "` is skipped.
pub fn comparison_title(title: &str) -> &str {
    title.strip_prefix("The ").unwrap_or(title)
}

fn bucket_label(title: &str) -> Option<String> {
    let first = comparison_title(title).trim_start().chars().next()?;
    if first.is_ascii_digit() {
        Some(DIGIT_BUCKET.to_string())
    } else {
        Some(first.to_uppercase().collect())
    }
}

/// Groups books into buckets by the first character of their comparison
/// title. Empty buckets never appear; `"0-9"` sorts before the letters.
pub fn shelve(books: &[BookSummary]) -> Vec<ShelfBucket> {
    let mut buckets: BTreeMap<String, Vec<BookSummary>> = BTreeMap::new();
    for book in books {
        if let Some(label) = bucket_label(&book.title) {
            buckets.entry(label).or_default().push(book.clone());
        }
    }

    buckets
        .into_iter()
        .map(|(label, mut books)| {
            books.sort_by_key(|b| comparison_title(&b.title).to_lowercase());
            ShelfBucket { label, books }
        })
        .collect()
}
