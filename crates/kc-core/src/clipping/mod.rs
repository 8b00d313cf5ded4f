//! Clipping domain: the raw source record, the normalized clipping, and the
//! pure derivations applied between the two.

pub mod created;
pub mod highlight;
mod inflect;
pub mod lookup_word;
mod model;
pub mod normalize;
pub mod page;

pub use created::{format_highlighted, parse_created};
pub use highlight::{contains_ignore_case, highlight_matches};
pub use lookup_word::lookup_word;
pub use model::{Clipping, ClippingKey, Definition, LookupStatus, RawClippingRecord};
pub use normalize::normalize_record;
pub use page::{page_label, InvalidLocation};
