use anyhow::{Context, bail};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

/// Google Books volume search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

const QUERY_VALUE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Build the search URL for `term`: `base` with the term as its only `q` parameter.
///
/// Anything already in `base`'s query string is replaced.
pub fn query_url(base: &str, term: &str) -> anyhow::Result<Url> {
    let term = term.trim();
    if term.is_empty() {
        bail!("search term is empty");
    }

    let mut url = Url::parse(base).with_context(|| format!("invalid base URL {base}"))?;
    let encoded = utf8_percent_encode(term, QUERY_VALUE_ENCODE_SET).to_string();
    url.set_query(Some(&format!("q={encoded}")));
    Ok(url)
}
