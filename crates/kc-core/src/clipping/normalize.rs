//! Raw source record → display-ready [`Clipping`].

use super::created::{format_highlighted, parse_created};
use super::lookup_word::lookup_word;
use super::model::{Clipping, LookupStatus, RawClippingRecord};
use super::page::page_label;
use crate::ids::{ClippingId, SourceId};

/// Trims every text field and derives the page label, the long-form
/// creation date and the lookup word.
///
/// Never fails: an unparsable location or timestamp only leaves the
/// corresponding derived field empty.
pub fn normalize_record(source: &SourceId, raw: RawClippingRecord) -> Clipping {
    let content = raw.content.trim().to_string();
    let location = raw.location.trim().to_string();
    let created_raw = raw.created.trim().to_string();
    let created = parse_created(&created_raw);
    let word = lookup_word(&content);

    Clipping {
        id: ClippingId::new(raw.id),
        source: source.clone(),
        title: raw.title.trim().to_string(),
        author: raw.author.trim().to_string(),
        page_label: page_label(&location).ok(),
        highlighted_display: created.as_ref().map(format_highlighted),
        created,
        lookup: if word.is_some() {
            LookupStatus::Unattempted
        } else {
            LookupStatus::Ineligible
        },
        lookup_word: word,
        definition: None,
        content,
        created_raw,
        location,
    }
}
