/// Characters dropped from a title when building its cover file name.
const COVER_STRIPPED_CHARS: &[char] = &[
    '.', ',', '!', ';', ':', '\'', '"', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '(', ')', '?',
];

/// Cover image URL for a book, derived from its canonical title.
pub fn book_cover_url(base_url: &str, title: &str) -> String {
    let file_stem: String = title
        .replace(' ', "_")
        .chars()
        .filter(|c| !COVER_STRIPPED_CHARS.contains(c))
        .collect();
    format!("{}/{}.jpg", base_url.trim_end_matches('/'), file_stem)
}
