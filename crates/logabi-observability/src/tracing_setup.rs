//! Tracing / logging initialisation helpers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// Log level per component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: component_name → level
    #[serde(default)]
    pub components: HashMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: HashMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// The `EnvFilter` directive string, e.g. `"info,logabi_batch=debug"`.
    /// Components are sorted so the result is stable.
    pub fn directives(&self) -> String {
        let mut components: Vec<_> = self.components.iter().collect();
        components.sort();
        let mut directives = self.level.clone();
        for (component, level) in components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.directives()).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialise tracing with the given log config.
/// Should be called once at application startup; panics if a global
/// subscriber is already installed.
pub fn init_tracing(config: &LogConfig) {
    if config.json {
        tracing_subscriber::registry()
            .with(config.filter())
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(config.filter())
            .with(fmt::layer())
            .init();
    }
}

/// Like [`init_tracing`], but returns an error instead of panicking when a
/// global subscriber already exists.
pub fn try_init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    if config.json {
        tracing_subscriber::registry()
            .with(config.filter())
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(config.filter())
            .with(fmt::layer())
            .try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_from_empty_json() {
        let config: LogConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.directives(), "info");
    }

    #[test]
    fn component_overrides_become_directives() {
        let config: LogConfig = serde_json::from_str(
            r#"{"level": "warn", "components": {"logabi-catalog": "debug", "logabi-batch": "trace"}, "json": true}"#,
        )
        .unwrap();
        assert!(config.json);
        assert_eq!(
            config.directives(),
            "warn,logabi_batch=trace,logabi_catalog=debug"
        );
    }

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        let config = LogConfig::default();
        let _ = try_init_tracing(&config);
        assert!(try_init_tracing(&config).is_err());
    }
}
