use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{article::MISSING_EXTRACT, ArticleContent},
    services::callback_registry::{CallbackRegistry, CallbackSubscription},
};

/// Separates the site prefix from the article title in an encyclopedia URL.
pub const ARTICLE_PATH_MARKER: &str = "/wiki/";

const MISSING_PAGE_ID: &str = "-1";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> AppResult<ArticleContent>;
}

/// Decoded article title from the path segment after `/wiki/`.
pub fn extract_article_title(url: &str) -> AppResult<String> {
    let invalid = || AppError::InvalidUrl("Invalid Wikipedia URL format".to_string());

    let segment = url.split(ARTICLE_PATH_MARKER).nth(1).ok_or_else(invalid)?;
    let segment = segment
        .split(|c| c == '#' || c == '?')
        .next()
        .unwrap_or_default();

    let title = percent_decode_str(segment)
        .decode_utf8()
        .map_err(|_| invalid())?;
    if title.trim().is_empty() {
        return Err(invalid());
    }

    Ok(title.into_owned())
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    pages: Option<HashMap<String, WikiPage>>,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    title: Option<String>,
    extract: Option<String>,
    missing: Option<Value>,
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(rename = "wikibase-shortdesc")]
    short_description: Option<String>,
}

/// Turns a content-service query payload into article text.
fn parse_query_payload(payload: Value, requested_title: &str) -> AppResult<ArticleContent> {
    let not_found = || AppError::ArticleNotFound("Article not found".to_string());

    let response: QueryResponse = serde_json::from_value(payload).map_err(|_| not_found())?;
    let pages = response
        .query
        .and_then(|q| q.pages)
        .ok_or_else(not_found)?;

    let (page_id, page) = pages.into_iter().next().ok_or_else(not_found)?;
    if page_id == MISSING_PAGE_ID || page.missing.is_some() {
        return Err(AppError::ArticleNotFound(
            "Article not found. Please check the URL.".to_string(),
        ));
    }

    let extract = page
        .extract
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| MISSING_EXTRACT.to_string());
    let description = page
        .pageprops
        .and_then(|p| p.short_description)
        .unwrap_or_default();

    Ok(ArticleContent {
        title: page.title.unwrap_or_else(|| requested_title.to_string()),
        extract,
        description,
    })
}

/// Reads article summaries from the MediaWiki query API using callback-wrapped responses.
pub struct WikipediaArticleFetcher {
    client: reqwest::Client,
    api_url: String,
    timeout: Duration,
    callbacks: Arc<CallbackRegistry>,
}

impl WikipediaArticleFetcher {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            timeout,
            callbacks: CallbackRegistry::new(),
        }
    }

    pub fn callbacks(&self) -> &Arc<CallbackRegistry> {
        &self.callbacks
    }

    async fn request_payload(
        &self,
        title: &str,
        subscription: &mut CallbackSubscription,
    ) -> AppResult<Value> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts|pageprops"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("titles", title),
                ("callback", subscription.name()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(AppError::NetworkError(format!(
                "Failed to load Wikipedia data (status {})",
                response.status().as_u16()
            )));
        }

        let body = response.text().await.map_err(transport_error)?;
        self.callbacks.dispatch(&body)?;
        subscription.recv().await
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::NetworkError(format!("Failed to load Wikipedia data: {}", err))
    }
}

#[async_trait]
impl ArticleFetcher for WikipediaArticleFetcher {
    async fn fetch(&self, url: &str) -> AppResult<ArticleContent> {
        let title = extract_article_title(url)?;
        log::info!("Fetching article '{}'", title);

        let mut subscription = self.callbacks.register();
        let outcome =
            tokio::time::timeout(self.timeout, self.request_payload(&title, &mut subscription))
                .await;
        drop(subscription);

        let payload = outcome.map_err(|_| {
            AppError::Timeout("Request timed out. Please try again.".to_string())
        })??;

        parse_query_payload(payload, &title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_is_decoded_path_segment() {
        assert_eq!(
            extract_article_title("https://en.wikipedia.org/wiki/Alan_Turing").unwrap(),
            "Alan_Turing"
        );
        assert_eq!(
            extract_article_title("https://en.wikipedia.org/wiki/G%C3%B6del%27s_theorem").unwrap(),
            "Gödel's_theorem"
        );
        assert_eq!(
            extract_article_title("https://en.m.wikipedia.org/wiki/Rust_(programming_language)#History")
                .unwrap(),
            "Rust_(programming_language)"
        );
    }

    #[test]
    fn url_without_marker_is_invalid() {
        for url in ["https://example.com/Alan_Turing", "Alan Turing", "https://en.wikipedia.org/wiki/"] {
            assert!(matches!(
                extract_article_title(url),
                Err(AppError::InvalidUrl(_))
            ));
        }
    }

    #[test]
    fn payload_with_page_is_parsed() {
        let payload = json!({
            "query": { "pages": { "30011": {
                "title": "Alan Turing",
                "extract": "Alan Mathison Turing was an English mathematician.",
                "pageprops": { "wikibase-shortdesc": "English computer scientist" }
            }}}
        });

        let article = parse_query_payload(payload, "Alan_Turing").unwrap();
        assert_eq!(article.title, "Alan Turing");
        assert_eq!(article.description, "English computer scientist");
        assert!(article.extract.starts_with("Alan Mathison"));
    }

    #[test]
    fn missing_page_sentinel_is_not_found() {
        let payload = json!({
            "query": { "pages": { "-1": { "title": "Nope", "missing": "" } } }
        });
        let err = parse_query_payload(payload, "Nope").unwrap_err();
        assert!(matches!(err, AppError::ArticleNotFound(msg) if msg.contains("check the URL")));
    }

    #[test]
    fn payload_without_query_is_not_found() {
        let err = parse_query_payload(json!({ "batchcomplete": "" }), "X").unwrap_err();
        assert!(matches!(err, AppError::ArticleNotFound(_)));
    }

    #[test]
    fn missing_extract_and_description_get_defaults() {
        let payload = json!({ "query": { "pages": { "12": { "title": "Stub" } } } });
        let article = parse_query_payload(payload, "Stub").unwrap();
        assert_eq!(article.extract, MISSING_EXTRACT);
        assert_eq!(article.description, "");
    }
}
