//! Plain-text rendering of views for the terminal.

use std::fmt::Write;

use kc_core::book::book_cover_url;
use kc_core::clipping::highlight_matches;
use kc_core::{Clipping, ShelfBucket};

pub fn count_label(n: usize) -> String {
    if n == 1 {
        "1 clipping".to_string()
    } else {
        format!("{n} clippings")
    }
}

pub fn render_shelves(buckets: &[ShelfBucket]) -> String {
    let mut out = String::new();
    for bucket in buckets {
        let _ = writeln!(out, "{}", bucket.label);
        for book in &bucket.books {
            let _ = writeln!(out, "  {} by {}", book.title, book.author);
        }
        out.push('\n');
    }
    out
}

/// Page and clipping date, e.g. `p. 90 | Clipped on Monday, January 2nd 2017 @ 3:04 pm`.
fn meta_line(clipping: &Clipping) -> String {
    let page = clipping.page_label.as_deref().unwrap_or("p. ?");
    match &clipping.highlighted_display {
        Some(when) => format!("{page} | Clipped on {when}"),
        None => page.to_string(),
    }
}

pub fn render_definition(clipping: &Clipping) -> Option<String> {
    let definition = clipping.definition.as_ref()?;
    let word = clipping.lookup_word.as_deref().unwrap_or(clipping.content.as_str());
    let mut line = format!("  {word}: {}", definition.text);
    if !definition.attribution.is_empty() {
        let _ = write!(line, " ({})", definition.attribution);
    }
    Some(line)
}

pub fn render_clipping(clipping: &Clipping) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", clipping.content.trim());
    let _ = writeln!(out, "  {}", meta_line(clipping));
    if let Some(definition) = render_definition(clipping) {
        let _ = writeln!(out, "{definition}");
    }
    out
}

/// One book's clippings under a header with its cover.
pub fn render_book(original_title: &str, cover_base_url: &str, clippings: &[Clipping]) -> String {
    let mut out = String::new();
    let author = clippings.first().map(|c| c.author.as_str()).unwrap_or_default();
    let _ = writeln!(out, "{original_title}");
    if !author.is_empty() {
        let _ = writeln!(out, "by {author}");
    }
    let _ = writeln!(out, "cover: {}", book_cover_url(cover_base_url, original_title));
    let _ = writeln!(out, "{}\n", count_label(clippings.len()));
    for clipping in clippings {
        out.push_str(&render_clipping(clipping));
        out.push('\n');
    }
    out
}

pub fn render_random(clipping: &Clipping, cover_base_url: &str) -> String {
    format!(
        "{} by {}\ncover: {}\n\n{}",
        clipping.title,
        clipping.author,
        book_cover_url(cover_base_url, &clipping.title),
        render_clipping(clipping)
    )
}

/// Search results with every match wrapped in `<mark>`.
pub fn render_search(query: &str, clippings: &[Clipping]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} matching \"{query}\"\n", count_label(clippings.len()));
    for clipping in clippings {
        out.push_str(&render_search_hit(query, clipping));
    }
    out
}

pub fn render_search_hit(query: &str, clipping: &Clipping) -> String {
    format!(
        "{} by {}\n{}\n  {}\n\n",
        clipping.title,
        clipping.author,
        highlight_matches(clipping.content.trim(), query),
        meta_line(clipping)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_core::clipping::{normalize_record, Definition, RawClippingRecord};
    use kc_core::{BookSummary, SourceId};

    const COVERS: &str = "https://kindleclippings.blob.core.windows.net/hires-book-covers";

    fn clipping(content: &str, location: &str) -> Clipping {
        normalize_record(
            &SourceId::from("test"),
            RawClippingRecord {
                id: 1,
                title: "Serendipity".to_string(),
                author: "Jane Doe".to_string(),
                content: content.to_string(),
                created: "01/02/2017 03:04 PM".to_string(),
                location: location.to_string(),
            },
        )
    }

    #[test]
    fn test_render_clipping_with_definition() {
        let mut c = clipping("Serendipity", "1503");
        c.settle_definition(Some(Definition {
            text: "Good fortune.".to_string(),
            attribution: "from Wiktionary".to_string(),
        }));

        let out = render_clipping(&c);
        assert!(out.contains("p. 90 | Clipped on Monday, January 2nd 2017 @ 3:04 pm"));
        assert!(out.contains("  serendipity: Good fortune. (from Wiktionary)"));
    }

    #[test]
    fn test_render_unparsable_location() {
        let out = render_clipping(&clipping("Some text", "n/a"));
        assert!(out.contains("p. ? | Clipped on"));
    }

    #[test]
    fn test_render_book_header_has_cover() {
        let out = render_book("Serendipity", COVERS, &[clipping("Some text", "20")]);
        assert!(out.starts_with("Serendipity\nby Jane Doe\n"));
        assert!(out.contains(&format!("cover: {COVERS}/Serendipity.jpg")));
        assert!(out.contains("1 clipping\n"));
    }

    #[test]
    fn test_render_search_marks_matches() {
        let out = render_search("happy", &[clipping("A Happy accident, happily.", "20")]);
        assert!(out.starts_with("1 clipping matching \"happy\""));
        assert!(out.contains("A <mark>Happy</mark> accident, <mark>happy</mark>ily."));
    }

    #[test]
    fn test_render_shelves() {
        let book = |title: &str| BookSummary {
            id: "1".to_string(),
            title: title.to_string(),
            original_title: title.to_string(),
            author: "A".to_string(),
            image_url: String::new(),
            description: String::new(),
        };
        let shelves = kc_core::book::shelve(&[book("Dune"), book("1984")]);
        let out = render_shelves(&shelves);
        assert_eq!(out, "0-9\n  1984 by A\n\nD\n  Dune by A\n\n");
    }
}
