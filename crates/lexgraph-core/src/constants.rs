/// Retriever names as they appear in configuration and in the `retrievers` output field.
pub mod retrievers {
    pub const CHUNK_BASED_SEARCH: &str = "ChunkBasedSearch";
    pub const ENTITY_BASED_SEARCH: &str = "EntityBasedSearch";
    pub const ENTITY_NETWORK_SEARCH: &str = "EntityNetworkSearch";
}

/// Marker accepted in config for a limit with no bound.
pub const UNBOUNDED: &str = "unbounded";

/// Marker accepted in config for an unset optional value.
pub const NONE: &str = "none";

/// Environment variable consulted by the tracing subscriber.
pub const LOG_ENV_VAR: &str = "LEXGRAPH_LOG";
