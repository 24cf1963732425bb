//! Turns a raw Google Books `volumes` response into [`Book`]s.
//!
//! Nothing in here returns an error to the caller. Every failure is logged and the
//! caller gets back whatever could be extracted, which may be nothing at all.
//!
//! A volume missing its title or preview link stops the whole extraction: the books
//! read before it are kept and the rest of the document is dropped. Unreadable
//! entries inside `authors` are the exception and are skipped one by one.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::book::{Book, NO_DATE, UNKNOWN_AUTHOR};

const AUTHOR_SEPARATOR: &str = ", ";

/// Why a document or one of its items could not be read.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no \"items\" array")]
    MissingItems,

    #[error("item {index} has no \"volumeInfo\" object")]
    MissingVolumeInfo { index: usize },

    #[error("item {index} has no readable \"{field}\"")]
    MissingField { index: usize, field: &'static str },
}

/// Extract books from a raw response body.
///
/// Returns `None` when there is nothing to parse (`raw` is absent or empty, which is
/// what a failed fetch hands over). Otherwise returns `Some`, holding the books in
/// document order; the list is empty when the document is malformed or matched
/// nothing.
pub fn extract(raw: Option<&str>) -> Option<Vec<Book>> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            debug!("empty response, nothing to extract");
            return None;
        }
    };

    let mut books = Vec::new();
    if let Err(e) = extract_into(raw, &mut books) {
        warn!(error = %e, kept = books.len(), "problem parsing the book results");
    }
    Some(books)
}

fn extract_into(raw: &str, books: &mut Vec<Book>) -> Result<(), ExtractError> {
    let root: Value = serde_json::from_str(raw)?;

    let Some(items) = root.get("items").and_then(Value::as_array) else {
        // The API omits `items` entirely when a query matches nothing.
        if root.get("totalItems").and_then(Value::as_u64) == Some(0) {
            debug!("query matched no volumes");
            return Ok(());
        }
        return Err(ExtractError::MissingItems);
    };

    for (index, item) in items.iter().enumerate() {
        books.push(parse_item(index, item)?);
    }
    debug!(count = books.len(), "extracted books");
    Ok(())
}

fn parse_item(index: usize, item: &Value) -> Result<Book, ExtractError> {
    let info = item
        .get("volumeInfo")
        .and_then(Value::as_object)
        .ok_or(ExtractError::MissingVolumeInfo { index })?;

    let title = required_text(info, index, "title")?;
    let url = required_text(info, index, "previewLink")?;
    let author = match info.get("authors") {
        None => UNKNOWN_AUTHOR.to_string(),
        Some(authors) => join_authors(index, authors),
    };
    let date = match info.get("publishedDate") {
        // An explicit null is treated as absent rather than shown as the text "null".
        None | Some(Value::Null) => NO_DATE.to_string(),
        Some(date) => scalar_text(date).unwrap_or_else(|| date.to_string()),
    };

    Ok(Book::new(title, author, url, date))
}

/// Numbers and booleans are read as their JSON text, so a title of `1984` is "1984".
fn required_text(
    info: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<String, ExtractError> {
    info.get(field)
        .and_then(scalar_text)
        .ok_or(ExtractError::MissingField { index, field })
}

/// Single author: that name alone. Several: every name followed by `", "`, including
/// the last one.
fn join_authors(index: usize, authors: &Value) -> String {
    let Some(names) = authors.as_array() else {
        warn!(item = index, "problem parsing authors: not an array");
        return String::new();
    };

    match names.as_slice() {
        [] => {
            warn!(item = index, "problem parsing one author: authors is empty");
            String::new()
        }
        [only] => scalar_text(only).unwrap_or_else(|| {
            warn!(item = index, value = %only, "problem parsing one author");
            String::new()
        }),
        many => {
            let mut joined = String::new();
            for (position, name) in many.iter().enumerate() {
                match scalar_text(name) {
                    Some(text) => {
                        joined.push_str(&text);
                        joined.push_str(AUTHOR_SEPARATOR);
                    }
                    None => {
                        warn!(item = index, position, value = %name, "problem parsing many authors")
                    }
                }
            }
            joined
        }
    }
}

/// Text of a string, number or boolean. `None` for anything without a plain textual
/// form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
