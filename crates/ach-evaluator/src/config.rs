//! Configuration for the Evaluator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default service endpoint (a local Ollama instance)
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Connection settings for the automated evaluation service
///
/// A service counts as configured only when endpoint and model are non-empty
/// and the timeout is positive. Anything else makes the evaluator use its
/// heuristic fallback.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// API base URL
    pub endpoint: String,

    /// Model name; empty disables the service
    pub model: String,

    /// Bearer credential, if the service requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,

    /// Upper bound for a single service call (seconds)
    pub timeout_secs: u64,
}

impl ServiceConfig {
    /// Configure a service at `endpoint` using `model`
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    /// Attach a bearer credential
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Get the call timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether the service path may be attempted at all
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.model.trim().is_empty() && self.timeout_secs > 0
    }
}

impl Default for ServiceConfig {
    /// Local endpoint with no model, so the service is off until a model is named
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: String::new(),
            credential: None,
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Configuration for the Evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Evaluation service connection
    pub service: ServiceConfig,

    /// Longest evidence text sent to the service (characters); longer text is truncated
    pub max_text_length: usize,
}

impl EvaluatorConfig {
    /// Replace the service settings
    pub fn with_service(mut self, service: ServiceConfig) -> Self {
        self.service = service;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if !self.service.model.trim().is_empty() {
            let endpoint = self.service.endpoint.trim();
            if endpoint.is_empty() {
                return Err("service.endpoint must be set when service.model is set".to_string());
            }
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(format!(
                    "service.endpoint must be an http(s) URL, got '{}'",
                    endpoint
                ));
            }
        }
        if self
            .service
            .credential
            .as_deref()
            .is_some_and(|c| c.trim().is_empty())
        {
            return Err("service.credential must not be blank".to_string());
        }
        Ok(())
    }
}

impl Default for EvaluatorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            max_text_length: 20_000,
        }
    }
}

impl EvaluatorConfig {
    /// Strict preset: short timeout and short prompts, falling back quickly
    pub fn strict() -> Self {
        Self {
            service: ServiceConfig {
                timeout_secs: 10,
                ..ServiceConfig::default()
            },
            max_text_length: 8_000,
        }
    }

    /// Lenient preset: long timeout and long prompts for slow local models
    pub fn lenient() -> Self {
        Self {
            service: ServiceConfig {
                timeout_secs: 120,
                ..ServiceConfig::default()
            },
            max_text_length: 50_000,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(EvaluatorConfig::default().validate().is_ok());
        assert!(EvaluatorConfig::strict().validate().is_ok());
        assert!(EvaluatorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_default_service_is_not_configured() {
        assert!(!ServiceConfig::default().is_configured());
    }

    #[test]
    fn test_service_configured_rules() {
        let service = ServiceConfig::new("http://localhost:11434", "llama3");
        assert!(service.is_configured());

        assert!(!service.clone().with_timeout_secs(0).is_configured());
        assert!(!ServiceConfig::new("", "llama3").is_configured());
        assert!(!ServiceConfig::new("http://localhost:11434", "  ").is_configured());
    }

    #[test]
    fn test_invalid_max_text_length() {
        let mut config = EvaluatorConfig::default();
        config.max_text_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_endpoint_scheme() {
        let config = EvaluatorConfig::default()
            .with_service(ServiceConfig::new("localhost:11434", "llama3"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_credential_rejected() {
        let config = EvaluatorConfig::default().with_service(
            ServiceConfig::new("http://localhost:11434", "llama3").with_credential(" "),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_credential() {
        let service = ServiceConfig::new("http://localhost:11434", "llama3").with_credential("hunter2");
        let debug = format!("{:?}", service);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EvaluatorConfig::lenient().with_service(
            ServiceConfig::new("https://llm.internal", "mistral")
                .with_credential("token")
                .with_timeout_secs(45),
        );
        let toml_str = config.to_toml().unwrap();
        let parsed = EvaluatorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = EvaluatorConfig::from_toml(
            r#"
            [service]
            model = "llama3"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.service.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(parsed.service.model, "llama3");
        assert_eq!(parsed.max_text_length, EvaluatorConfig::default().max_text_length);
        assert!(parsed.service.is_configured());
    }
}
