pub mod defaults;
mod limit;
mod observability_config;
mod retrieval_config;

pub use limit::{optional, Limit};
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::{
    DiscoveryMethod, DiscoveryMode, DiscoveryPolicy, PartialResultsPolicy, RerankerKind,
    RetrievalConfig, RetrieverKind,
};

use serde::{Deserialize, Serialize};

use crate::errors::{LexGraphError, LexGraphResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexGraphConfig {
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl LexGraphConfig {
    /// Load config from a TOML string. Missing fields use defaults.
    pub fn from_toml(toml_str: &str) -> LexGraphResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| LexGraphError::ConfigError {
            reason: e.to_string(),
        })?;
        config.retrieval.validate()?;
        Ok(config)
    }

    /// Render the config back to TOML.
    pub fn to_toml(&self) -> LexGraphResult<String> {
        toml::to_string(self).map_err(|e| LexGraphError::ConfigError {
            reason: e.to_string(),
        })
    }
}
