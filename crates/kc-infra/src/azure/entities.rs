//! Table entities as returned with `odata=nometadata`.

use serde::Deserialize;

use kc_core::clipping::RawClippingRecord;
use kc_core::ports::FetchError;

/// Numeric columns were imported as strings in some tables and as numbers in
/// others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseId {
    Number(i64),
    Text(String),
}

impl LooseId {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LooseId::Number(n) => Some(*n),
            LooseId::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            LooseId::Number(n) => n.to_string(),
            LooseId::Text(s) => s.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EntitySet<T> {
    pub value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClippingEntity {
    pub id: LooseId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub location: String,
}

impl ClippingEntity {
    pub fn into_record(self) -> Result<RawClippingRecord, FetchError> {
        let id = self
            .id
            .as_i64()
            .ok_or_else(|| FetchError::malformed(format!("clipping id {:?} is not an integer", self.id)))?;
        Ok(RawClippingRecord {
            id,
            title: self.title,
            author: self.author,
            content: self.content,
            created: self.created,
            location: self.location,
        })
    }
}

/// Projection used when only ids are selected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdEntity {
    pub id: LooseId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BookEntity {
    #[serde(default)]
    pub title: String,
    pub goodreads_id: Option<LooseId>,
}
