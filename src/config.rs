//! Configuration
//!
//! JSON file with every field defaulted, plus an environment override for
//! the suggestion credential.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};
use crate::engine::{SpinSettings, WheelGeometry};
use crate::gateway::{
    GeminiGateway, HttpSuggestionGateway, StaticGateway, SuggestionGateway, DEFAULT_GEMINI_BASE,
    DEFAULT_GEMINI_MODEL,
};
use crate::store::{DocumentStore, FileSlot, DEFAULT_STORAGE_KEY};

/// Checked first, then `API_KEY`
pub const API_KEY_ENV: &str = "FOOD_WHEEL_API_KEY";
const LEGACY_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the collection document
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub storage_key: String,
    pub spin: SpinConfig,
    pub gateway: GatewayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            spin: SpinConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub settle_ms: u64,
    pub min_turns: u32,
    pub pointer_deg: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        let geometry = WheelGeometry::default();
        Self {
            settle_ms: 4500,
            min_turns: geometry.min_turns,
            pointer_deg: geometry.pointer_deg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    Http,
    Gemini,
    Static,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub kind: GatewayKind,
    /// Full URL for `http`, base URL for `gemini`
    pub endpoint: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub suggestion_count: usize,
    pub timeout_ms: u64,
    /// Names served by the `static` gateway
    pub static_names: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            kind: GatewayKind::Gemini,
            endpoint: DEFAULT_GEMINI_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: None,
            suggestion_count: 5,
            timeout_ms: 15_000,
            static_names: Vec::new(),
        }
    }
}

impl Config {
    /// Read `path` if it exists, otherwise defaults
    pub fn load(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Config(format!("read {}: {}", path.display(), e)))?;
        serde_json::from_str(&text).map_err(|e| DomainError::Config(format!("parse {}: {}", path.display(), e)))
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Credential from `lookup`, if one of the known variables is set
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let key = [API_KEY_ENV, LEGACY_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());
        if key.is_some() {
            self.gateway.api_key = key;
        }
        self
    }

    pub fn spin_settings(&self) -> SpinSettings {
        SpinSettings {
            settle: Duration::from_millis(self.spin.settle_ms),
            geometry: WheelGeometry {
                pointer_deg: self.spin.pointer_deg,
                min_turns: self.spin.min_turns,
            },
        }
    }

    pub fn document_store(&self) -> DocumentStore {
        DocumentStore::new(
            std::sync::Arc::new(FileSlot::new(self.data_dir.clone())),
            self.storage_key.clone(),
        )
    }

    pub fn build_gateway(&self) -> DomainResult<Box<dyn SuggestionGateway>> {
        let gateway = &self.gateway;
        let timeout = Duration::from_millis(gateway.timeout_ms);
        let built: Box<dyn SuggestionGateway> = match gateway.kind {
            GatewayKind::Http => Box::new(HttpSuggestionGateway::new(
                gateway.endpoint.clone(),
                gateway.api_key.clone(),
                timeout,
            )?),
            GatewayKind::Gemini => Box::new(GeminiGateway::new(
                gateway.endpoint.clone(),
                gateway.model.clone(),
                gateway.api_key.clone(),
                timeout,
            )?),
            GatewayKind::Static => Box::new(StaticGateway::new(gateway.static_names.clone())),
        };
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_key, "foodLists");
        assert_eq!(config.spin_settings().settle, Duration::from_millis(4500));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"spin":{"settle_ms":10},"gateway":{"kind":"static","static_names":["Phở"]}}"#).unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.spin.settle_ms, 10);
        assert_eq!(config.spin.min_turns, 5);
        assert_eq!(config.gateway.kind, GatewayKind::Static);
        assert_eq!(config.gateway.suggestion_count, 5);
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(Config::load(&path), Err(DomainError::Config(_))));
    }

    #[test]
    fn test_env_credential_override() {
        let config = Config::default().with_overrides_from(|name| match name {
            "FOOD_WHEEL_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some("legacy".to_string()),
            _ => None,
        });
        assert_eq!(config.gateway.api_key.as_deref(), Some("legacy"));

        let untouched = Config::default().with_overrides_from(|_| None);
        assert_eq!(untouched.gateway.api_key, None);
    }

    #[tokio::test]
    async fn test_static_gateway_from_config() {
        let mut config = Config::default();
        config.gateway.kind = GatewayKind::Static;
        config.gateway.static_names = vec!["Phở".to_string(), "Bún".to_string()];

        let gateway = config.build_gateway().unwrap();
        assert_eq!(gateway.suggest("ctx", 1).await, vec!["Phở".to_string()]);
    }
}
