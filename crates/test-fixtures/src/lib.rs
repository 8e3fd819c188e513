//! Test fixture loader for lexgraph graph snapshots and query scenarios.
//!
//! Fixtures live in this crate's `data/` directory; paths are relative to it.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Canonical two-source Neptune snapshot plus one unrelated source.
pub const NEPTUNE_GRAPH: &str = "graphs/neptune.json";

/// The comparison question the Neptune snapshot is built around.
pub const NEPTUNE_QUERY: &str =
    "What are the differences between Neptune Database and Neptune Analytics?";

fn fixtures_root() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neptune_graph_is_listed_and_parses() {
        assert!(fixture_exists(NEPTUNE_GRAPH));
        assert!(list_fixtures("graphs")
            .iter()
            .any(|p| p.ends_with("neptune.json")));
        let value = load_fixture_value(NEPTUNE_GRAPH);
        assert!(value["statements"].as_array().is_some_and(|s| !s.is_empty()));
    }

    #[test]
    fn both_neptune_sources_mention_both_products() {
        let value = load_fixture_value(NEPTUNE_GRAPH);
        let statements = value["statements"].as_array().unwrap();
        for source in ["neptune-database-guide", "neptune-analytics-guide"] {
            let touched: Vec<&str> = statements
                .iter()
                .filter(|s| s["sourceId"] == source)
                .flat_map(|s| s["facts"].as_array().unwrap())
                .flat_map(|f| [f["subjectId"].as_str(), f["objectId"].as_str()])
                .flatten()
                .collect();
            assert!(touched.contains(&"e-neptune-database"), "{source}");
            assert!(touched.contains(&"e-neptune-analytics"), "{source}");
        }
    }
}
