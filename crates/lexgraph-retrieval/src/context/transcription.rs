//! Textual renderings of entity paths, for reranking and vector search.

use lexgraph_core::models::EntityContext;

/// The whole path: entity values joined in order.
pub fn path_transcription(context: &EntityContext) -> String {
    context.values().join(", ")
}

/// Search texts for one context: the whole path, and for paths of three or
/// more entities also the last hop on its own.
pub fn transcriptions(context: &EntityContext) -> Vec<String> {
    if context.is_empty() {
        return Vec::new();
    }
    let mut out = vec![path_transcription(context)];
    let values = context.values();
    if values.len() >= 3 {
        out.push(values[values.len() - 2..].join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgraph_core::models::{Entity, ScoredEntity};

    fn ctx(values: &[&str]) -> EntityContext {
        EntityContext::new(
            values
                .iter()
                .map(|v| {
                    ScoredEntity::new(
                        Entity {
                            entity_id: v.to_lowercase(),
                            value: v.to_string(),
                            classification: "Thing".into(),
                        },
                        1.0,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn short_paths_have_one_transcription() {
        assert_eq!(
            transcriptions(&ctx(&["Neptune Analytics", "openCypher"])),
            vec!["Neptune Analytics, openCypher"]
        );
    }

    #[test]
    fn long_paths_add_the_last_hop() {
        assert_eq!(
            transcriptions(&ctx(&["Neptune Database", "AWS", "Amazon S3"])),
            vec!["Neptune Database, AWS, Amazon S3", "AWS, Amazon S3"]
        );
    }

    #[test]
    fn empty_context_has_none() {
        assert!(transcriptions(&EntityContext::default()).is_empty());
    }
}
