use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;

use kc_core::book::BookMetadata;
use kc_core::ports::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    ImageUrl,
    Description,
    AuthorName,
}

#[derive(Default)]
struct Collected {
    id: Option<String>,
    title: Option<String>,
    image_url: Option<String>,
    description: Option<String>,
    author: Option<String>,
}

impl Collected {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::ImageUrl => &mut self.image_url,
            Field::Description => &mut self.description,
            Field::AuthorName => &mut self.author,
        }
    }
}

/// Which field an element opened at `path` (relative to the first `<book>`)
/// feeds, if any. Nested books (similar books, series works) are skipped.
fn field_at(path: &[Vec<u8>]) -> Option<Field> {
    match path {
        [tag] => match tag.as_slice() {
            b"id" => Some(Field::Id),
            b"title" => Some(Field::Title),
            b"image_url" => Some(Field::ImageUrl),
            b"description" => Some(Field::Description),
            _ => None,
        },
        [authors, author, name]
            if authors.as_slice() == b"authors"
                && author.as_slice() == b"author"
                && name.as_slice() == b"name" =>
        {
            Some(Field::AuthorName)
        }
        _ => None,
    }
}

/// Extracts the first `<book>` element of a `book/show` response.
///
/// `id` and `title` are required; the first listed author wins; a missing
/// image or description is left empty.
pub fn parse_book(xml: &str) -> Result<BookMetadata, FetchError> {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    // Element names below the first <book>; None until it opens.
    let mut book_path: Option<Vec<Vec<u8>>> = None;
    let mut current: Option<Field> = None;
    let mut collected = Collected::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name().as_ref().to_vec();
                match book_path.as_mut() {
                    None if name.as_slice() == b"book" => book_path = Some(Vec::new()),
                    None => {}
                    Some(path) => {
                        path.push(name);
                        current = field_at(path).filter(|f| collected.slot(*f).is_none());
                    }
                }
            }
            Ok(Event::Text(ref t)) => {
                if let Some(field) = current {
                    let text = t.unescape().map_err(FetchError::malformed)?;
                    append(collected.slot(field), &text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(field) = current {
                    append(collected.slot(field), &String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                current = None;
                match book_path.as_mut() {
                    Some(path) if path.is_empty() => break,
                    Some(path) => {
                        path.pop();
                    }
                    None => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FetchError::malformed(format!("invalid book XML: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    if book_path.is_none() {
        return Err(FetchError::malformed("response has no <book> element"));
    }
    let id = collected
        .id
        .ok_or_else(|| FetchError::malformed("book has no id"))?;
    let title = collected
        .title
        .ok_or_else(|| FetchError::malformed("book has no title"))?;

    Ok(BookMetadata {
        id: id.trim().to_string(),
        title: title.trim().to_string(),
        author: collected.author.unwrap_or_default().trim().to_string(),
        image_url: collected.image_url.unwrap_or_default().trim().to_string(),
        description: collected.description.unwrap_or_default().trim().to_string(),
    })
}

fn append(slot: &mut Option<String>, text: &str) {
    slot.get_or_insert_with(String::new).push_str(text);
}
