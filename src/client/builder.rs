use keyring::Entry;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::config::{parse_base_url, ClientConfig, ConfigFile, LogMetadata, Placeholders, DEFAULT_TIMEOUT};
use super::core::DialogueClient;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};

pub const TOKEN_ENV: &str = "SUVVY_API_TOKEN";
pub const API_URL_ENV: &str = "SUVVY_API_URL";
pub const TIMEOUT_ENV: &str = "SUVVY_HTTP_TIMEOUT_SECS";

const KEYRING_SERVICE: &str = "suvvy-api";
const KEYRING_USER: &str = "default";

/// Builder for creating clients with custom configuration.
///
/// Each setting is resolved from, in order: the explicit builder call, the
/// optional YAML file, the environment, then a built-in default. The token
/// additionally falls back to the OS keyring.
pub struct DialogueClientBuilder {
    api_token: Option<String>,
    base_url: Option<String>,
    placeholders: Option<Placeholders>,
    custom_log_info: Option<LogMetadata>,
    source: Option<String>,
    timeout: Option<Duration>,
    file: Option<ConfigFile>,
    use_env: bool,
    transport: Option<Arc<dyn Transport>>,
    #[cfg(feature = "blocking")]
    blocking_transport: Option<Arc<dyn crate::transport::BlockingTransport>>,
}

impl DialogueClientBuilder {
    pub fn new() -> Self {
        Self {
            api_token: None,
            base_url: None,
            placeholders: None,
            custom_log_info: None,
            source: None,
            timeout: None,
            file: None,
            use_env: true,
            transport: None,
            #[cfg(feature = "blocking")]
            blocking_transport: None,
        }
    }

    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Override the service URL (e.g. a staging host or a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Placeholders sent with every prediction; per-call values win on collision.
    pub fn placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = Some(placeholders);
        self
    }

    /// Log metadata sent with every prediction; per-call values win on collision.
    pub fn custom_log_info(mut self, info: LogMetadata) -> Self {
        self.custom_log_info = Some(info);
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read settings from a YAML file.
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.file = Some(ConfigFile::from_path(path)?);
        Ok(self)
    }

    pub fn config(mut self, file: ConfigFile) -> Self {
        self.file = Some(file);
        self
    }

    /// Ignore `SUVVY_*` environment variables and the keyring.
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Inject the transport used by [`build`](Self::build).
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Inject the transport used by [`build_blocking`](Self::build_blocking).
    #[cfg(feature = "blocking")]
    pub fn blocking_transport(
        mut self,
        transport: Arc<dyn crate::transport::BlockingTransport>,
    ) -> Self {
        self.blocking_transport = Some(transport);
        self
    }

    fn env(&self, name: &str) -> Option<String> {
        if !self.use_env {
            return None;
        }
        std::env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn keyring_token(&self) -> Option<String> {
        if !self.use_env {
            return None;
        }
        let entry = Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
        entry.get_password().ok()
    }

    /// Resolve the settings without creating a transport.
    pub fn resolve_config(&self) -> Result<ClientConfig> {
        let file = self.file.clone().unwrap_or_default();

        let api_token = non_blank(self.api_token.clone())
            .or_else(|| non_blank(file.api_token))
            .or_else(|| self.env(TOKEN_ENV))
            .or_else(|| non_blank(self.keyring_token()))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "API token required",
                    ErrorContext::new()
                        .with_field_path("api_token")
                        .with_details(format!("set it on the builder, in the config file or in {}", TOKEN_ENV)),
                )
            })?;

        let mut config = ClientConfig::new(api_token);

        if let Some(raw) = self
            .base_url
            .clone()
            .or(file.api_url)
            .or_else(|| self.env(API_URL_ENV))
        {
            config.base_url = parse_base_url(&raw)?;
        }

        let timeout = match (self.timeout, file.timeout_secs) {
            (Some(t), _) => Some(t),
            (None, Some(secs)) => Some(Duration::from_secs(secs)),
            (None, None) => match self.env(TIMEOUT_ENV) {
                Some(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                    Error::configuration_with_context(
                        format!("Invalid timeout: {}", e),
                        ErrorContext::new().with_field_path(TIMEOUT_ENV).with_details(raw.clone()),
                    )
                })?)),
                None => None,
            },
        };
        config.timeout = timeout.filter(|t| !t.is_zero()).unwrap_or(DEFAULT_TIMEOUT);

        if let Some(placeholders) = self.placeholders.clone().or(file.placeholders) {
            config.placeholders = placeholders;
        }
        if let Some(info) = self.custom_log_info.clone().or(file.custom_log_info) {
            config.custom_log_info = info;
        }
        if let Some(source) = self.source.clone().or(file.source) {
            config.source = source;
        }

        debug!(base_url = config.base_url.as_str(), timeout_secs = config.timeout.as_secs(), "client configured");
        Ok(config)
    }

    /// Build the asynchronous client.
    pub fn build(self) -> Result<DialogueClient> {
        let config = self.resolve_config()?;
        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(config.timeout)?),
        };
        Ok(DialogueClient::with_transport(config, transport))
    }

    /// Build the blocking client.
    ///
    /// Must not be called from within an async runtime when the default
    /// transport is used.
    #[cfg(feature = "blocking")]
    pub fn build_blocking(self) -> Result<super::blocking::DialogueClient> {
        let config = self.resolve_config()?;
        let transport = match self.blocking_transport {
            Some(t) => t,
            None => Arc::new(crate::transport::BlockingHttpTransport::new(config.timeout)?),
        };
        Ok(super::blocking::DialogueClient::with_transport(config, transport))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Default for DialogueClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_token_is_configuration_error() {
        let err = DialogueClientBuilder::new().without_env().resolve_config().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_blank_builder_token_falls_back_to_file() {
        let file = ConfigFile {
            api_token: Some("file-token".into()),
            ..Default::default()
        };
        let config = DialogueClientBuilder::new()
            .without_env()
            .api_token("  ")
            .config(file)
            .resolve_config()
            .unwrap();
        assert_eq!(config.api_token, "file-token");

        let err = DialogueClientBuilder::new()
            .without_env()
            .api_token("")
            .config(ConfigFile {
                api_token: Some(String::new()),
                ..Default::default()
            })
            .resolve_config()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_builder_overrides_file() {
        let file = ConfigFile {
            api_token: Some("file-token".into()),
            api_url: Some("https://file.example".into()),
            source: Some("file-source".into()),
            timeout_secs: Some(10),
            ..Default::default()
        };
        let config = DialogueClientBuilder::new()
            .without_env()
            .config(file)
            .source("builder-source")
            .resolve_config()
            .unwrap();
        assert_eq!(config.api_token, "file-token");
        assert_eq!(config.base_url.as_str(), "https://file.example/");
        assert_eq!(config.source, "builder-source");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_defaults() {
        let config = DialogueClientBuilder::new()
            .without_env()
            .api_token("t")
            .resolve_config()
            .unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.suvvy.ai/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.source, crate::DEFAULT_SOURCE);
        assert!(config.placeholders.is_empty());
    }

    #[test]
    fn test_instance_maps() {
        let placeholders = json!({"name": "Roman"}).as_object().cloned().unwrap();
        let config = DialogueClientBuilder::new()
            .without_env()
            .api_token("t")
            .placeholders(placeholders.clone())
            .resolve_config()
            .unwrap();
        assert_eq!(config.placeholders, placeholders);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = DialogueClientBuilder::new()
            .without_env()
            .api_token("t")
            .base_url("not a url")
            .resolve_config()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
