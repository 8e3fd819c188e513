use std::collections::BTreeMap;

use lexgraph_core::config::RetrieverKind;
use lexgraph_core::models::*;

fn statement(id: &str, topic: &str, source: &str) -> Statement {
    Statement {
        statement_id: id.into(),
        value: format!("statement {id}"),
        topic: TopicRef {
            topic_id: topic.into(),
            value: format!("topic {topic}"),
        },
        source_id: source.into(),
        chunk_id: Some(format!("chunk-{id}")),
        facts: vec![Fact {
            fact_id: format!("fact-{id}"),
            value: format!("fact for {id}"),
            subject_id: "e1".into(),
            object_id: Some("e2".into()),
        }],
    }
}

#[test]
fn candidate_merge_keeps_max_score_and_all_retrievers() {
    let mut a = RetrievalCandidate::new(
        statement("s1", "t1", "src"),
        Source::new("src"),
        0.4,
        RetrieverKind::EntityNetworkSearch,
    );
    let b = RetrievalCandidate::new(
        statement("s1", "t1", "src"),
        Source::new("src"),
        0.7,
        RetrieverKind::ChunkBasedSearch,
    );
    a.merge(b.clone());
    a.merge(b);
    assert_eq!(a.score, 0.7);
    assert_eq!(
        a.retrievers,
        vec![
            RetrieverKind::ChunkBasedSearch,
            RetrieverKind::EntityNetworkSearch
        ]
    );
}

#[test]
fn negative_scores_are_clamped() {
    let c = RetrievalCandidate::new(
        statement("s1", "t1", "src"),
        Source::new("src"),
        -0.3,
        RetrieverKind::ChunkBasedSearch,
    );
    assert_eq!(c.score, 0.0);
}

#[test]
fn search_result_serializes_to_output_schema() {
    let mut metadata = BTreeMap::new();
    metadata.insert("url".to_string(), serde_json::json!("https://example.com/a"));
    let source = Source {
        source_id: "src-a".into(),
        metadata,
    };
    let candidate = RetrievalCandidate::new(
        statement("s1", "t1", "src-a"),
        source.clone(),
        0.9,
        RetrieverKind::ChunkBasedSearch,
    );
    let topic = candidate.topic().clone();
    let result = SearchResult::new(source, topic, vec![candidate.into()]);

    let output = RetrievalOutput {
        results: vec![result],
        entity_contexts: EntityContexts {
            contexts: vec![EntityContext::new(vec![ScoredEntity {
                entity: Entity {
                    entity_id: "e1".into(),
                    value: "Neptune Database".into(),
                    classification: "Service".into(),
                },
                score: 12.0,
                reranking_score: 0.5,
            }])],
        },
    };

    let json = serde_json::to_value(&output).unwrap();
    let r = &json["results"][0];
    assert_eq!(r["source"]["sourceId"], "src-a");
    assert_eq!(r["source"]["metadata"]["url"], "https://example.com/a");
    let t = &r["topics"][0];
    assert_eq!(t["topic"], "topic t1");
    assert_eq!(t["topicId"], "t1");
    let s = &t["statements"][0];
    assert_eq!(s["statementId"], "s1");
    assert_eq!(s["statement"], "statement s1");
    assert_eq!(s["facts"][0], "fact for s1");
    assert_eq!(s["chunkId"], "chunk-s1");
    assert_eq!(s["score"], 0.9);
    assert_eq!(s["statement_str"], "statement s1\n  fact for s1");
    assert_eq!(s["retrievers"][0], "ChunkBasedSearch");

    let ctx = &json["entity_contexts"]["contexts"][0][0];
    assert_eq!(ctx["entity"]["entityId"], "e1");
    assert_eq!(ctx["entity"]["value"], "Neptune Database");
    assert_eq!(ctx["entity"]["classification"], "Service");
    assert_eq!(ctx["score"], 12.0);
    assert_eq!(ctx["reranking_score"], 0.5);
}

#[test]
fn entity_context_depth_counts_hops() {
    let e = |id: &str| ScoredEntity::new(
        Entity {
            entity_id: id.into(),
            value: id.into(),
            classification: "Thing".into(),
        },
        1.0,
    );
    assert_eq!(EntityContext::new(vec![e("a")]).depth(), 0);
    assert_eq!(EntityContext::new(vec![e("a"), e("b"), e("c")]).depth(), 2);
    let contexts = EntityContexts {
        contexts: vec![
            EntityContext::new(vec![e("a"), e("b")]),
            EntityContext::new(vec![e("a"), e("c")]),
        ],
    };
    assert_eq!(contexts.entity_ids(), vec!["a", "b", "c"]);
}
