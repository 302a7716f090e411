mod images;
mod llm;
mod personas;
mod planner;
mod server;
mod storage;

pub use images::*;
pub use llm::*;
pub use personas::*;
pub use planner::*;
pub use server::*;
pub use storage::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub personas: PersonasConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError::error("server.port", "port must be greater than 0"));
        }
        if self.server.host.is_empty() {
            errors.push(ConfigError::error("server.host", "host must not be empty"));
        }
        if self.server.max_concurrent_requests == 0 {
            errors.push(ConfigError::error(
                "server.max_concurrent_requests",
                "must be greater than 0",
            ));
        }

        if self.llm.providers.is_empty() {
            errors.push(ConfigError::warning("llm.providers", "no LLM providers configured"));
        }
        for (i, provider) in self.llm.providers.iter().enumerate() {
            if provider.id.is_empty() {
                errors.push(ConfigError::error(
                    format!("llm.providers[{i}].id"),
                    "provider id must not be empty",
                ));
            }
            if provider.base_url.is_empty() {
                errors.push(ConfigError::error(
                    format!("llm.providers[{i}].base_url"),
                    "provider base_url must not be empty",
                ));
            }
        }
        for (role, spec) in &self.llm.roles {
            if !ModelRole::ALL.iter().any(|r| r.as_str() == role) {
                errors.push(ConfigError::warning(
                    format!("llm.roles.{role}"),
                    "unknown role is ignored",
                ));
            }
            if !spec.contains('/') {
                errors.push(ConfigError::error(
                    format!("llm.roles.{role}"),
                    format!("expected \"provider/model\", got \"{spec}\""),
                ));
            }
        }

        if self.planner.agent_max_attempts == 0 {
            errors.push(ConfigError::error(
                "planner.agent_max_attempts",
                "must be at least 1",
            ));
        }
        if self.planner.hotel_price_min > self.planner.hotel_price_max {
            errors.push(ConfigError::error(
                "planner.hotel_price_min",
                format!(
                    "min ({}) exceeds max ({})",
                    self.planner.hotel_price_min, self.planner.hotel_price_max
                ),
            ));
        }

        if self.images.max_concurrency == 0 {
            errors.push(ConfigError::error("images.max_concurrency", "must be greater than 0"));
        }
        if !(5..=15).contains(&self.images.verify_timeout_secs) {
            errors.push(ConfigError::warning(
                "images.verify_timeout_secs",
                "values outside 5-15s either reject slow hosts or stall enrichment",
            ));
        }

        if self.server.cors.allowed_origins.len() == 1
            && self.server.cors.allowed_origins[0] == "*"
        {
            errors.push(ConfigError::warning(
                "server.cors.allowed_origins",
                "wildcard \"*\" allows all origins (not recommended for production)",
            ));
        }

        errors
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(issues: &[ConfigError], field: &str) -> bool {
        issues
            .iter()
            .any(|i| i.severity == ConfigSeverity::Error && i.field == field)
    }

    #[test]
    fn default_config_only_warns() {
        let issues = Config::default().validate();
        assert!(issues.iter().all(|i| i.severity == ConfigSeverity::Warning));
        assert!(issues.iter().any(|i| i.field == "llm.providers"));
    }

    #[test]
    fn zero_port_is_error() {
        let mut cfg = Config::default();
        cfg.server.port = 0;
        assert!(has_error(&cfg.validate(), "server.port"));
    }

    #[test]
    fn inverted_hotel_range_is_error() {
        let mut cfg = Config::default();
        cfg.planner.hotel_price_min = 5000;
        cfg.planner.hotel_price_max = 1000;
        assert!(has_error(&cfg.validate(), "planner.hotel_price_min"));
    }

    #[test]
    fn role_without_provider_prefix_is_error() {
        let mut cfg = Config::default();
        cfg.llm.roles.insert("draft".into(), "gemini-2.0-flash".into());
        assert!(has_error(&cfg.validate(), "llm.roles.draft"));
    }

    #[test]
    fn zero_image_concurrency_is_error() {
        let mut cfg = Config::default();
        cfg.images.max_concurrency = 0;
        assert!(has_error(&cfg.validate(), "images.max_concurrency"));
    }

    #[test]
    fn display_formats_severity_tag() {
        let e = ConfigError::error("server.host", "host must not be empty");
        assert_eq!(e.to_string(), "[ERROR] server.host: host must not be empty");
    }
}
