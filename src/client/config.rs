//! Client configuration and per-call options.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::{Error, ErrorContext, Result};

/// Named template values forwarded to the prediction engine.
pub type Placeholders = Map<String, Value>;

/// Free-form metadata attached to the service's prediction logs.
pub type LogMetadata = Map<String, Value>;

pub const DEFAULT_API_URL: &str = "https://api.suvvy.ai";

/// Generous upper bound for a single exchange; predictions can be slow.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Overlay `call` on top of `instance`. Keys from `call` win.
pub fn merge_overlay(instance: &Map<String, Value>, call: Option<&Map<String, Value>>) -> Map<String, Value> {
    let mut merged = instance.clone();
    if let Some(call) = call {
        for (key, value) in call {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Settings held by a client instance.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub api_token: String,
    pub base_url: Url,
    pub placeholders: Placeholders,
    pub custom_log_info: LogMetadata,
    pub source: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: default_base_url(),
            placeholders: Placeholders::new(),
            custom_log_info: LogMetadata::new(),
            source: crate::DEFAULT_SOURCE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolve the values actually sent with a prediction call.
    pub fn effective_options(&self, options: &PredictOptions) -> EffectiveOptions {
        EffectiveOptions {
            placeholders: merge_overlay(&self.placeholders, options.placeholders.as_ref()),
            custom_log_info: merge_overlay(&self.custom_log_info, options.custom_log_info.as_ref()),
            source: options
                .source
                .clone()
                .unwrap_or_else(|| self.source.clone()),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("placeholders", &self.placeholders)
            .field("custom_log_info", &self.custom_log_info)
            .field("source", &self.source)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API URL is valid")
}

/// Parse and normalise a base URL.
///
/// Trailing slashes and whitespace are dropped; the URL must be absolute http(s).
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches(['/', '\\']);
    let url = Url::parse(trimmed).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid base URL: {}", e),
            ErrorContext::new()
                .with_field_path("api_url")
                .with_details(raw.to_string()),
        )
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            "Base URL must be an absolute http(s) URL",
            ErrorContext::new()
                .with_field_path("api_url")
                .with_details(raw.to_string()),
        ));
    }
    Ok(url)
}

/// Per-call overrides for prediction calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictOptions {
    pub placeholders: Option<Placeholders>,
    pub custom_log_info: Option<LogMetadata>,
    pub source: Option<String>,
}

impl PredictOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = Some(placeholders);
        self
    }

    /// Add a single placeholder.
    pub fn placeholder(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.placeholders
            .get_or_insert_with(Placeholders::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn custom_log_info(mut self, info: LogMetadata) -> Self {
        self.custom_log_info = Some(info);
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Instance settings merged with [`PredictOptions`].
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveOptions {
    pub placeholders: Placeholders,
    pub custom_log_info: LogMetadata,
    pub source: String,
}

/// YAML configuration file.
///
/// ```yaml
/// api_url: https://api.suvvy.ai
/// source: my-shop-bot
/// timeout_secs: 120
/// placeholders:
///   shop_name: Acme
/// custom_log_info:
///   env: staging
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub placeholders: Option<Placeholders>,
    #[serde(default)]
    pub custom_log_info: Option<LogMetadata>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| {
            Error::configuration_with_context(
                "Invalid configuration file",
                ErrorContext::new().with_details(e.to_string()),
            )
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Cannot read configuration file: {}", e),
                ErrorContext::new().with_source(path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_merge_call_level_wins() {
        let instance = map(json!({"a": 1, "b": 2}));
        let call = map(json!({"b": 3, "c": 4}));
        assert_eq!(
            merge_overlay(&instance, Some(&call)),
            map(json!({"a": 1, "b": 3, "c": 4}))
        );
        // Inputs untouched.
        assert_eq!(instance, map(json!({"a": 1, "b": 2})));
    }

    #[test]
    fn test_merge_without_call_map() {
        let instance = map(json!({"a": 1}));
        assert_eq!(merge_overlay(&instance, None), instance);
        assert_eq!(merge_overlay(&Map::new(), None), Map::new());
    }

    #[test]
    fn test_effective_source_falls_back_to_instance() {
        let mut config = ClientConfig::new("token");
        config.source = "bot".into();
        assert_eq!(config.effective_options(&PredictOptions::new()).source, "bot");
        assert_eq!(
            config
                .effective_options(&PredictOptions::new().source("call"))
                .source,
            "call"
        );
    }

    #[test]
    fn test_parse_base_url_trims() {
        let url = parse_base_url(" https://test.api.suvvy.ai/ \n").unwrap();
        assert_eq!(url.as_str(), "https://test.api.suvvy.ai/");
        assert!(parse_base_url("api.suvvy.ai").is_err());
        assert!(parse_base_url("mailto:me@example.com").is_err());
    }

    #[test]
    fn test_config_file_yaml() {
        let file = ConfigFile::from_yaml_str(
            "api_url: https://x.example\ntimeout_secs: 5\nplaceholders:\n  name: Roman\n",
        )
        .unwrap();
        assert_eq!(file.api_url.as_deref(), Some("https://x.example"));
        assert_eq!(file.timeout_secs, Some(5));
        assert_eq!(file.placeholders.unwrap()["name"], json!("Roman"));
        assert!(ConfigFile::from_yaml_str("unknown_key: 1").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", ClientConfig::new("secret-token"));
        assert!(!rendered.contains("secret-token"));
    }
}
