//! Suggestion Gateway
//!
//! External collaborator producing candidate item names from a textual
//! context. Gateways never fail past this boundary: any credential, network
//! or response problem is logged and turned into an empty result. Returned
//! names are not validated here; `apply_suggestions` trims and skips blanks.

mod gemini;
mod http;

#[cfg(test)]
mod stub;

pub use gemini::{GeminiGateway, DEFAULT_GEMINI_BASE, DEFAULT_GEMINI_MODEL};
pub use http::HttpSuggestionGateway;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{DomainError, DomainResult};

/// Served instead of a network call when no credential is configured
pub const FALLBACK_SUGGESTIONS: [&str; 4] = ["Mì Gói", "Trứng Luộc", "Rau Luộc", "Cơm Chiên"];

#[async_trait]
pub trait SuggestionGateway: Send + Sync {
    /// Up to `count` candidate names for `context`. Empty on failure.
    async fn suggest(&self, context: &str, count: usize) -> Vec<String>;
}

pub fn fallback_suggestions() -> Vec<String> {
    FALLBACK_SUGGESTIONS.iter().map(|name| name.to_string()).collect()
}

/// Collapse a gateway result into the boundary contract
pub(crate) fn settle(result: DomainResult<Vec<String>>, context: &str, count: usize) -> Vec<String> {
    match result {
        Ok(mut names) => {
            names.truncate(count);
            names
        }
        Err(e) => {
            warn!(context, error = %e, "suggestion request failed");
            Vec::new()
        }
    }
}

/// Body must be a JSON array of strings
pub(crate) fn parse_names(body: &str) -> DomainResult<Vec<String>> {
    serde_json::from_str::<Vec<String>>(body)
        .map_err(|e| DomainError::Gateway(format!("malformed suggestion list: {}", e)))
}

/// Empty or missing credentials count as absent
pub(crate) fn credential(api_key: &Option<String>) -> Option<&str> {
    api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
}

/// Fixed names, for offline shells and tests
#[derive(Debug, Clone, Default)]
pub struct StaticGateway {
    names: Vec<String>,
}

impl StaticGateway {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl SuggestionGateway for StaticGateway {
    async fn suggest(&self, _context: &str, count: usize) -> Vec<String> {
        self.names.iter().take(count).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(
            parse_names(r#"["Bánh Xèo", "Hủ Tiếu"]"#).unwrap(),
            vec!["Bánh Xèo".to_string(), "Hủ Tiếu".to_string()]
        );
        assert!(matches!(parse_names(r#"{"names": []}"#), Err(DomainError::Gateway(_))));
        assert!(parse_names(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn test_settle_truncates_and_swallows_errors() {
        let names = settle(Ok(vec!["a".into(), "b".into(), "c".into()]), "ctx", 2);
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);

        let names = settle(Err(DomainError::Gateway("boom".into())), "ctx", 5);
        assert!(names.is_empty());
    }

    #[test]
    fn test_blank_credential_is_absent() {
        assert_eq!(credential(&None), None);
        assert_eq!(credential(&Some("  ".into())), None);
        assert_eq!(credential(&Some("k".into())), Some("k"));
    }

    #[tokio::test]
    async fn test_static_gateway_respects_count() {
        let gateway = StaticGateway::new(["Phở", "Bún", "Cơm"]);
        assert_eq!(gateway.suggest("any", 2).await, vec!["Phở".to_string(), "Bún".to_string()]);
        assert_eq!(fallback_suggestions().len(), 4);
    }
}
