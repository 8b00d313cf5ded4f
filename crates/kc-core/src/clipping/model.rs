use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ids::{ClippingId, SourceId};

/// A clipping exactly as the source returns it.
///
/// Field values are untrimmed; `created` follows `MM/DD/YYYY h:mm a` and
/// `location` is either a single number or a hyphenated range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClippingRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created: String,
    pub location: String,
}

/// A resolved definition and the provider's attribution text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub text: String,
    pub attribution: String,
}

/// Where a clipping stands with respect to definition lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupStatus {
    /// Multi-word content, never looked up.
    Ineligible,
    /// Eligible and not yet handed to the throttler.
    Unattempted,
    /// A lookup task exists for this clipping.
    Scheduled,
    Resolved,
    /// The lookup failed or returned nothing usable. Never retried.
    Unavailable,
}

/// Identity of a clipping across partitions.
///
/// Source ids restart at 1 in every partition, so the id alone is only
/// unique within one source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClippingKey {
    pub source: SourceId,
    pub id: ClippingId,
}

/// A normalized clipping ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clipping {
    pub id: ClippingId,
    pub source: SourceId,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_raw: String,
    pub location: String,
    /// `None` when the location could not be parsed.
    pub page_label: Option<String>,
    /// `None` when `created_raw` does not follow the source pattern.
    pub highlighted_display: Option<String>,
    pub created: Option<NaiveDateTime>,
    pub lookup_word: Option<String>,
    pub lookup: LookupStatus,
    pub definition: Option<Definition>,
}

impl Clipping {
    pub fn key(&self) -> ClippingKey {
        ClippingKey {
            source: self.source.clone(),
            id: self.id,
        }
    }

    pub fn awaits_lookup(&self) -> bool {
        self.lookup == LookupStatus::Unattempted && self.lookup_word.is_some()
    }

    pub fn mark_scheduled(&mut self) {
        self.lookup = LookupStatus::Scheduled;
    }

    /// Records the outcome of this clipping's one and only lookup.
    pub fn settle_definition(&mut self, definition: Option<Definition>) {
        self.lookup = if definition.is_some() {
            LookupStatus::Resolved
        } else {
            LookupStatus::Unavailable
        };
        self.definition = definition;
    }
}
