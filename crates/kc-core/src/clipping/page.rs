//! Kindle location → approximate printed page.

use thiserror::Error;

/// Kindle locations per printed page.
pub const LOCATIONS_PER_PAGE: f64 = 16.69;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid location: {0:?}")]
pub struct InvalidLocation(pub String);

/// Parses the leading base-10 integer of the first segment of a location range.
///
/// Like a lenient integer parse, trailing garbage after the digits is ignored,
/// but a segment without any leading digit is rejected. Digit runs of any
/// length are accepted.
pub fn first_location(location: &str) -> Result<f64, InvalidLocation> {
    let first = location.split('-').next().unwrap_or_default().trim_start();
    let digits: String = first.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(InvalidLocation(location.to_string()));
    }
    digits
        .parse::<f64>()
        .map_err(|_| InvalidLocation(location.to_string()))
}

/// Maps a location string (`"1234"` or `"1234-1250"`) to a page number.
///
/// Pages beyond `i64::MAX` saturate.
pub fn page_number(location: &str) -> Result<i64, InvalidLocation> {
    let start = first_location(location)?;
    Ok((start / LOCATIONS_PER_PAGE).floor() as i64)
}

/// Maps a location string to its display label, e.g. `"p. 73"`.
pub fn page_label(location: &str) -> Result<String, InvalidLocation> {
    page_number(location).map(|page| format!("p. {page}"))
}
