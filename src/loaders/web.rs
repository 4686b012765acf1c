//! Web page extraction: single-attempt fetch plus HTML stripping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

use super::Extractor;
use crate::models::{Document, DocumentType};
use crate::types::PipelineError;

const USER_AGENT: &str = concat!("trainsmith-ingestor/", env!("CARGO_PKG_VERSION"));

/// Fetches a URL once (no retries) and normalizes the response body.
///
/// HTML responses are stripped of `<script>`/`<style>` content and collapsed
/// to single-space-joined tokens; the `<title>` element supplies the document
/// title, falling back to the URL's host+path. Non-HTML responses are used
/// verbatim.
#[derive(Clone, Debug)]
pub struct WebExtractor {
    client: Client,
}

impl WebExtractor {
    /// Builds an extractor whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| PipelineError::Io(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Extractor for WebExtractor {
    async fn extract(&self, source: &str) -> Result<Document, PipelineError> {
        let url = Url::parse(source).map_err(|err| PipelineError::extraction(source, err))?;
        info!(url = %url, "fetching url");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| PipelineError::extraction(source, err))?
            .error_for_status()
            .map_err(|err| PipelineError::extraction(source, err))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let body = response
            .text()
            .await
            .map_err(|err| PipelineError::extraction(source, err))?;

        let (title, content) = if content_type.contains("text/html") {
            let title = find_title(&body).unwrap_or_else(|| host_and_path(&url));
            (title, strip_html(&body))
        } else {
            (host_and_path(&url), body)
        };

        debug!(url = %url, words = content.split_whitespace().count(), "url extracted");
        Ok(Document::new(title, content, source, DocumentType::Url)
            .with_metadata("content_type", serde_json::json!(content_type)))
    }
}

/// Strips `<script>`/`<style>` elements and collapses all remaining text to
/// single-space-joined non-empty tokens.
pub fn strip_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the `<title>` element's trimmed text, if present and non-empty.
pub fn find_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let element = document.select(&selector).next()?;
    let text = element.text().collect::<Vec<_>>().join(" ");
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if matches!(el.value().name(), "script" | "style" | "noscript") {
                continue;
            }
            collect_text(el, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        }
    }
}

fn host_and_path(url: &Url) -> String {
    let fallback = format!("{}{}", url.host_str().unwrap_or_default(), url.path());
    if fallback.is_empty() {
        url.to_string()
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn strip_html_drops_scripts_and_collapses_whitespace() {
        let html = r#"<html><head><style>p { color: red; }</style></head>
            <body><script>var x = 1;</script>
            <p>Hello   world</p>
            <p>second
            line</p></body></html>"#;
        assert_eq!(strip_html(html), "Hello world second line");
    }

    #[test]
    fn find_title_trims_and_rejects_empty() {
        assert_eq!(
            find_title("<html><head><title>  My Page </title></head></html>"),
            Some("My Page".to_string())
        );
        assert_eq!(find_title("<html><head><title>  </title></head></html>"), None);
        assert_eq!(find_title("<html><body>no title</body></html>"), None);
    }

    #[test]
    fn host_and_path_fallback() {
        let url = Url::parse("https://example.com/docs/page?q=1").unwrap();
        assert_eq!(host_and_path(&url), "example.com/docs/page");
    }

    #[tokio::test]
    async fn html_response_is_stripped_with_title() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page");
                then.status(200)
                    .header("content-type", "text/html; charset=utf-8")
                    .body("<html><head><title>Sample</title></head><body><p>alpha beta</p><script>x()</script></body></html>");
            })
            .await;

        let extractor = WebExtractor::new(Duration::from_secs(5)).unwrap();
        let doc = extractor.extract(&server.url("/page")).await.unwrap();
        assert_eq!(doc.title(), "Sample");
        assert_eq!(doc.content(), "Sample alpha beta");
        assert_eq!(doc.doc_type(), DocumentType::Url);
    }

    #[tokio::test]
    async fn non_html_body_is_used_verbatim() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data.txt");
                then.status(200)
                    .header("content-type", "text/plain")
                    .body("raw body\ncontent");
            })
            .await;

        let extractor = WebExtractor::new(Duration::from_secs(5)).unwrap();
        let doc = extractor.extract(&server.url("/data.txt")).await.unwrap();
        assert_eq!(doc.content(), "raw body\ncontent");
        assert!(doc.title().ends_with("/data.txt"));
    }

    #[tokio::test]
    async fn slow_response_exceeding_the_timeout_fails_extraction() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200)
                    .header("content-type", "text/plain")
                    .body("late")
                    .delay(Duration::from_millis(500));
            })
            .await;

        let extractor = WebExtractor::new(Duration::from_millis(50)).unwrap();
        let source = server.url("/slow");
        let err = extractor.extract(&source).await.unwrap_err();
        match err {
            PipelineError::ExtractionFailed { origin, .. } => assert_eq!(origin, source),
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_status_fails_extraction() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;

        let extractor = WebExtractor::new(Duration::from_secs(5)).unwrap();
        let err = extractor.extract(&server.url("/missing")).await.unwrap_err();
        assert!(matches!(err, PipelineError::ExtractionFailed { .. }));
    }
}
