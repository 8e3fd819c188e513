//! Interpretation of opaque metadata filters by the in-memory adapters.

use serde_json::Value;

use lexgraph_core::models::{MetadataFilter, Source};

/// A filter matches a source when every key of the filter object equals the
/// source's metadata value for that key. `null` matches everything.
pub fn source_matches(filter: Option<&MetadataFilter>, source: &Source) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    match filter.as_value() {
        Value::Null => true,
        Value::Object(conditions) => conditions
            .iter()
            .all(|(key, expected)| source.metadata.get(key) == Some(expected)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source() -> Source {
        let mut s = Source::new("a");
        s.metadata.insert("tenant".into(), json!("acme"));
        s.metadata.insert("year".into(), json!(2024));
        s
    }

    #[test]
    fn no_filter_matches() {
        assert!(source_matches(None, &source()));
        assert!(source_matches(Some(&MetadataFilter::new(Value::Null)), &source()));
    }

    #[test]
    fn all_keys_must_match() {
        let ok = MetadataFilter::new(json!({"tenant": "acme", "year": 2024}));
        let bad = MetadataFilter::new(json!({"tenant": "acme", "year": 2023}));
        let missing = MetadataFilter::new(json!({"region": "eu"}));
        assert!(source_matches(Some(&ok), &source()));
        assert!(!source_matches(Some(&bad), &source()));
        assert!(!source_matches(Some(&missing), &source()));
    }

    #[test]
    fn non_object_filters_match_nothing() {
        let f = MetadataFilter::new(json!(["tenant"]));
        assert!(!source_matches(Some(&f), &source()));
    }
}
