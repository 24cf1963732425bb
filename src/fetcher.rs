use std::time::Duration;

use tracing::{debug, warn};
use ureq::http::StatusCode;
use url::Url;

use crate::{book::Book, extractor};

/// Timeouts for the single GET issued per search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    pub connect_timeout: Duration,
    /// Upper bound on waiting for the response head, and again for the body.
    pub read_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(10),
        }
    }
}

/// Search and extract in one go: fetch `url`, then hand the body to the extractor.
///
/// `None` means nothing came back over the wire.
pub fn fetch_books(config: &FetchConfig, url: &Url) -> Option<Vec<Book>> {
    let body = fetch(config, url);
    extractor::extract(Some(&body))
}

/// GET `url` and return its body.
///
/// Anything other than a 200 with a readable body gives an empty string; the cause is
/// logged rather than returned.
pub fn fetch(config: &FetchConfig, url: &Url) -> String {
    let cfg = ureq::Agent::config_builder()
        .timeout_connect(Some(config.connect_timeout))
        .timeout_recv_response(Some(config.read_timeout))
        .timeout_recv_body(Some(config.read_timeout))
        .http_status_as_error(false)
        .build();
    let agent = ureq::Agent::new_with_config(cfg);

    debug!(%url, "requesting book results");
    let mut res = match agent
        .get(url.as_str())
        .header("Accept", "application/json")
        .header("User-Agent", concat!("booklisting/", env!("CARGO_PKG_VERSION")))
        .call()
    {
        Ok(res) => res,
        Err(e) => {
            warn!(%url, error = %e, "problem making the HTTP request");
            return String::new();
        }
    };

    let status = res.status();
    if status != StatusCode::OK {
        warn!(%url, status = status.as_u16(), "error response code");
        return String::new();
    }

    match res.body_mut().read_to_string() {
        Ok(body) => {
            debug!(bytes = body.len(), "received book results");
            body
        }
        Err(e) => {
            warn!(%url, error = %e, "problem retrieving the JSON results");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VOLUMES_PATH: &str = "/books/v1/volumes";

    /// Mount a single GET response for `?q=test` and return the URL that hits it.
    async fn serve(server: &MockServer, response: ResponseTemplate) -> Url {
        Mock::given(method("GET"))
            .and(path(VOLUMES_PATH))
            .and(query_param("q", "test"))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
        Url::parse(&format!("{}{VOLUMES_PATH}?q=test", server.uri())).unwrap()
    }

    fn quick() -> FetchConfig {
        FetchConfig {
            connect_timeout: Duration::from_secs(2),
            read_timeout: Duration::from_secs(2),
        }
    }

    async fn fetch_blocking(url: Url) -> String {
        tokio::task::spawn_blocking(move || fetch(&quick(), &url))
            .await
            .expect("fetch task")
    }

    #[test]
    fn default_timeouts() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.connect_timeout, Duration::from_secs(15));
        assert_eq!(cfg.read_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn ok_response_returns_body() {
        let server = MockServer::start().await;
        let url = serve(
            &server,
            ResponseTemplate::new(200).set_body_string(r#"{"totalItems":0}"#),
        )
        .await;
        assert_eq!(fetch_blocking(url).await, r#"{"totalItems":0}"#);
    }

    #[tokio::test]
    async fn error_status_returns_empty_string() {
        let server = MockServer::start().await;
        let url = serve(&server, ResponseTemplate::new(503).set_body_string("busy")).await;
        assert_eq!(fetch_blocking(url).await, "");
    }

    #[tokio::test]
    async fn slow_response_times_out_to_empty_string() {
        let server = MockServer::start().await;
        let url = serve(
            &server,
            ResponseTemplate::new(200)
                .set_body_string(r#"{"totalItems":0}"#)
                .set_delay(Duration::from_secs(10)),
        )
        .await;
        assert_eq!(fetch_blocking(url).await, "");
    }

    #[test]
    fn unreachable_port_returns_empty_string() {
        // Nothing can listen on port 0, so the connect fails straight away.
        let url = Url::parse("http://127.0.0.1:0/books/v1/volumes?q=test").unwrap();
        assert_eq!(fetch(&quick(), &url), "");
    }

    #[tokio::test]
    async fn fetch_books_extracts_served_document() {
        let server = MockServer::start().await;
        let url = serve(
            &server,
            ResponseTemplate::new(200).set_body_string(
                r#"{"items":[{"volumeInfo":{"title":"T","previewLink":"U","authors":["A"],"publishedDate":"2007-03-15"}}]}"#,
            ),
        )
        .await;
        let books = tokio::task::spawn_blocking(move || fetch_books(&quick(), &url))
            .await
            .expect("fetch task")
            .expect("body received");
        assert_eq!(books, vec![Book::new("T", "A", "U", "2007-03-15")]);
    }

    #[tokio::test]
    async fn fetch_books_on_failed_fetch_is_none() {
        let server = MockServer::start().await;
        let url = serve(&server, ResponseTemplate::new(404)).await;
        let books = tokio::task::spawn_blocking(move || fetch_books(&quick(), &url))
            .await
            .expect("fetch task");
        assert_eq!(books, None);
    }
}
