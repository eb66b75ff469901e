//! Plain HTTP Suggestion Gateway
//!
//! `POST {endpoint}` with `{"context": ..., "count": ...}` and a bearer
//! credential; the response body is a JSON array of strings.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use super::{credential, fallback_suggestions, parse_names, settle, SuggestionGateway};
use crate::domain::{DomainError, DomainResult};

#[derive(Serialize)]
struct SuggestRequest<'a> {
    context: &'a str,
    count: usize,
}

pub struct HttpSuggestionGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpSuggestionGateway {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Gateway(format!("failed to build client: {}", e)))?;
        Ok(Self::with_client(client, endpoint, api_key))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    async fn request(&self, key: &str, context: &str, count: usize) -> DomainResult<Vec<String>> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&SuggestRequest { context, count })
            .send()
            .await
            .map_err(|e| DomainError::Gateway(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Gateway(format!("suggestion service returned {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Gateway(e.to_string()))?;
        parse_names(&body)
    }
}

#[async_trait]
impl SuggestionGateway for HttpSuggestionGateway {
    async fn suggest(&self, context: &str, count: usize) -> Vec<String> {
        let Some(key) = credential(&self.api_key) else {
            warn!("no suggestion credential configured, serving fallback list");
            return fallback_suggestions();
        };
        debug!(context, count, endpoint = %self.endpoint, "requesting suggestions");
        settle(self.request(key, context, count).await, context, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::stub::serve_once;

    fn gateway(base: &str, key: Option<&str>) -> HttpSuggestionGateway {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpSuggestionGateway::with_client(client, format!("{}/suggest", base), key.map(str::to_string))
    }

    #[tokio::test]
    async fn test_missing_credential_serves_fallback() {
        let gateway = gateway("http://127.0.0.1:9", None);
        assert_eq!(gateway.suggest("Healthy", 5).await, fallback_suggestions());
    }

    #[tokio::test]
    async fn test_sends_context_and_count() {
        let (base, server) = serve_once("200 OK", r#"["Bánh Xèo", "Hủ Tiếu"]"#).await;

        let names = gateway(&base, Some("secret")).suggest("Lộn Xộn", 5).await;
        let request = server.await.unwrap();

        assert_eq!(names, vec!["Bánh Xèo".to_string(), "Hủ Tiếu".to_string()]);
        assert!(request.starts_with("POST /suggest"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer secret"));
        assert!(request.contains(r#""count":5"#));
        assert!(request.contains(r#""context":"Lộn Xộn""#));
    }

    #[tokio::test]
    async fn test_error_status_yields_empty() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"down"}"#).await;
        assert!(gateway(&base, Some("secret")).suggest("ctx", 5).await.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_yields_empty() {
        let (base, server) = serve_once("200 OK", r#"{"names":["Phở"]}"#).await;
        assert!(gateway(&base, Some("secret")).suggest("ctx", 5).await.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_service_yields_empty() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let names = gateway(&format!("http://{}", addr), Some("secret")).suggest("ctx", 5).await;
        assert!(names.is_empty());
    }
}
