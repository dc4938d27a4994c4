//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::normalizer::DEFAULT_MAX_PROXY_DEPTH;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Recognized element type names.
    pub types: TypesConfig,

    /// Normalizer tuning.
    pub normalizer: NormalizerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Element type names the normalizer treats specially.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TypesConfig {
    /// Type name of route elements.
    pub route: String,

    /// Type name of redirect elements.
    pub redirect: String,

    /// Type name of pass-through grouping elements (none if unset).
    pub fragment: Option<String>,
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            route: "Route".to_string(),
            redirect: "Redirect".to_string(),
            fragment: Some("Fragment".to_string()),
        }
    }
}

/// Normalizer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Maximum proxy layers unwrapped before an element is treated as non-route.
    pub max_proxy_depth: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_proxy_depth: DEFAULT_MAX_PROXY_DEPTH,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (e.g. "info", "route_config=debug").
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}
