/// Substituted when a volume carries no `authors` key.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
/// Substituted when a volume carries no `publishedDate` key.
pub const NO_DATE: &str = "No date";

/// A single search hit, as shown in the result list.
///
/// Construction does no validation; fallbacks for missing fields are applied by
/// [`crate::extractor::extract`] before a `Book` is built. There are no setters, so a
/// `Book` never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    author: String,
    url: String,
    /// Raw `publishedDate` text, e.g. "2007-03-15", "2007-03" or "2007".
    date: String,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Book {
            title: title.into(),
            author: author.into(),
            url: url.into(),
            date: date.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Year shown next to the book: everything before the first `-` of the date.
    ///
    /// Dates without a `-` (a bare year, or [`NO_DATE`]) are returned whole.
    pub fn year(&self) -> &str {
        self.date.split('-').next().unwrap_or(&self.date)
    }
}
