//! Parsing and display of the source's creation timestamp.

use chrono::NaiveDateTime;

/// Source pattern, i.e. `MM/DD/YYYY h:mm a`.
pub const CREATED_PATTERN: &str = "%m/%d/%Y %I:%M %p";

pub fn parse_created(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), CREATED_PATTERN).ok()
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long-form display, e.g. `Monday, January 2nd 2017 @ 3:04 pm`.
pub fn format_highlighted(created: &NaiveDateTime) -> String {
    use chrono::Datelike;

    let day = created.day();
    format!(
        "{}{}{} {}",
        created.format("%A, %B "),
        day,
        ordinal_suffix(day),
        created.format("%Y @ %-I:%M %P")
    )
}
