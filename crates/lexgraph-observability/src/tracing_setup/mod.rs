//! Subscriber installation and span definitions.

pub mod spans;

use tracing_subscriber::EnvFilter;

use lexgraph_core::config::ObservabilityConfig;
use lexgraph_core::constants::LOG_ENV_VAR;
use lexgraph_core::errors::{LexGraphError, LexGraphResult};

/// Install the global `fmt` subscriber.
///
/// The filter comes from `LEXGRAPH_LOG` when set, otherwise from
/// `config.log_level`. Fails if a global subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> LexGraphResult<()> {
    let filter = build_filter(std::env::var(LOG_ENV_VAR).ok().as_deref(), &config.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| LexGraphError::ConfigError {
        reason: format!("tracing subscriber: {e}"),
    })
}

/// Env override first, configured level second.
pub fn build_filter(env_override: Option<&str>, default_level: &str) -> LexGraphResult<EnvFilter> {
    let directives = env_override
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_level);
    EnvFilter::try_new(directives).map_err(|e| LexGraphError::ConfigError {
        reason: format!("invalid log filter {directives:?}: {e}"),
    })
}
