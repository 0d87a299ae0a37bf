//! Demo configuration.

use crate::service::dispatch::NODE_ENV;
use crate::service::{Backend, DemoError, Env, Variant};
use serde::{Deserialize, Serialize};

pub const SERVICE_VAR: &str = "CLODO_SERVICE";
pub const VARIANT_VAR: &str = "CLODO_VARIANT";
pub const BACKEND_VAR: &str = "CLODO_BACKEND";
pub const INTERACTIVE_VAR: &str = "CLODO_INTERACTIVE";
pub const INSTALL_DELAY_VAR: &str = "CLODO_INSTALL_DELAY_MS";

/// Configuration for a demo run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Name given to the demo service.
    pub service_name: String,
    /// Which branch table the service runs.
    pub variant: Variant,
    /// Requested backend.
    pub backend: Backend,
    /// Whether to ask the operator which scenario to run.
    pub interactive: bool,
    /// Simulated install delay in milliseconds.
    pub install_delay_ms: u64,
    /// Environment handed to the service.
    pub env: Env,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            service_name: "demo".to_string(),
            variant: Variant::default(),
            backend: Backend::default(),
            interactive: false,
            install_delay_ms: 1000,
            env: Env::new(),
        }
    }
}

impl DemoConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the config from the process environment.
    pub fn from_env() -> Result<Self, DemoError> {
        Self::from_vars(std::env::vars())
    }

    /// Read the config from key/value pairs. Unknown keys are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, DemoError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let value = value.into();
            match key.as_ref() {
                SERVICE_VAR if !value.trim().is_empty() => {
                    config.service_name = value.trim().to_string();
                }
                VARIANT_VAR => {
                    config.variant = value
                        .parse()
                        .map_err(|reason| DemoError::config(VARIANT_VAR, &value, reason))?;
                }
                BACKEND_VAR => {
                    config.backend = value
                        .parse()
                        .map_err(|reason| DemoError::config(BACKEND_VAR, &value, reason))?;
                }
                INTERACTIVE_VAR => {
                    config.interactive = parse_flag(&value).ok_or_else(|| {
                        DemoError::config(INTERACTIVE_VAR, &value, "expected a boolean")
                    })?;
                }
                INSTALL_DELAY_VAR => {
                    config.install_delay_ms = value.trim().parse().map_err(
                        |e: std::num::ParseIntError| {
                            DemoError::config(INSTALL_DELAY_VAR, &value, e.to_string())
                        },
                    )?;
                }
                NODE_ENV => {
                    config.env.insert(NODE_ENV.to_string(), value);
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Set the service name.
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Set the variant.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the requested backend.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Enable or disable the interactive menu.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Set the install delay.
    pub fn install_delay_ms(mut self, millis: u64) -> Self {
        self.install_delay_ms = millis;
        self
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::new();
        assert_eq!(config.service_name, "demo");
        assert_eq!(config.variant, Variant::Live);
        assert_eq!(config.backend, Backend::Framework);
        assert!(!config.interactive);
        assert_eq!(config.install_delay_ms, 1000);
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_from_vars() {
        let config = DemoConfig::from_vars([
            ("CLODO_SERVICE", "shop"),
            ("CLODO_VARIANT", "enhanced"),
            ("CLODO_BACKEND", "simulated"),
            ("CLODO_INTERACTIVE", "yes"),
            ("CLODO_INSTALL_DELAY_MS", "0"),
            ("NODE_ENV", "staging"),
            ("PATH", "/usr/bin"),
        ])
        .unwrap();

        assert_eq!(config.service_name, "shop");
        assert_eq!(config.variant, Variant::Enhanced);
        assert_eq!(config.backend, Backend::Simulated);
        assert!(config.interactive);
        assert_eq!(config.install_delay_ms, 0);
        assert_eq!(config.env.get("NODE_ENV"), Some(&"staging".to_string()));
        assert_eq!(config.env.len(), 1);
    }

    #[test]
    fn test_from_vars_rejects_bad_values() {
        let err = DemoConfig::from_vars([("CLODO_VARIANT", "bogus")]).unwrap_err();
        assert!(matches!(err, DemoError::Config { ref key, .. } if key == "CLODO_VARIANT"));

        let err = DemoConfig::from_vars([("CLODO_INSTALL_DELAY_MS", "soon")]).unwrap_err();
        assert!(matches!(err, DemoError::Config { .. }));

        let err = DemoConfig::from_vars([("CLODO_INTERACTIVE", "maybe")]).unwrap_err();
        assert!(matches!(err, DemoError::Config { .. }));
    }

    #[test]
    fn test_blank_service_name_keeps_default() {
        let config = DemoConfig::from_vars([("CLODO_SERVICE", "  ")]).unwrap();
        assert_eq!(config.service_name, "demo");
    }

    #[test]
    fn test_builder() {
        let config = DemoConfig::new()
            .service_name("edge")
            .variant(Variant::Basic)
            .backend(Backend::Simulated)
            .interactive(true)
            .install_delay_ms(5)
            .env("NODE_ENV", "demo");

        assert_eq!(config.service_name, "edge");
        assert_eq!(config.variant, Variant::Basic);
        assert_eq!(config.env.get("NODE_ENV"), Some(&"demo".to_string()));
    }

    #[test]
    fn test_serializes_lowercase_names() {
        let json = serde_json::to_value(DemoConfig::new()).unwrap();
        assert_eq!(json["variant"], "live");
        assert_eq!(json["backend"], "framework");
    }
}
