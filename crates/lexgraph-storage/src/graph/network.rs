//! petgraph::StableGraph wrapper holding the entity network.

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Undirected;

/// Edge weight between two entities: the facts relating them.
#[derive(Debug, Clone, Default)]
pub struct EntityLink {
    pub fact_ids: Vec<String>,
}

impl EntityLink {
    pub fn strength(&self) -> usize {
        self.fact_ids.len()
    }
}

pub type EntityGraph = StableGraph<String, EntityLink, Undirected>;

/// Entity network with O(1) id lookup.
#[derive(Debug, Default)]
pub struct EntityNetwork {
    pub graph: EntityGraph,
    pub node_index: HashMap<String, NodeIndex>,
}

impl EntityNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_node(&mut self, entity_id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(entity_id) {
            return idx;
        }
        let idx = self.graph.add_node(entity_id.to_string());
        self.node_index.insert(entity_id.to_string(), idx);
        idx
    }

    /// Record that `fact_id` relates two entities. Repeats of the same fact are ignored.
    pub fn link(&mut self, a: &str, b: &str, fact_id: &str) {
        if a == b {
            return;
        }
        let ia = self.ensure_node(a);
        let ib = self.ensure_node(b);
        match self.graph.find_edge(ia, ib) {
            Some(edge) => {
                if let Some(link) = self.graph.edge_weight_mut(edge) {
                    if !link.fact_ids.iter().any(|f| f == fact_id) {
                        link.fact_ids.push(fact_id.to_string());
                    }
                }
            }
            None => {
                self.graph.add_edge(
                    ia,
                    ib,
                    EntityLink {
                        fact_ids: vec![fact_id.to_string()],
                    },
                );
            }
        }
    }

    /// Neighbours ordered by link strength descending, then id.
    pub fn neighbours(&self, entity_id: &str, exclude: &HashSet<String>, limit: usize) -> Vec<String> {
        let Some(&idx) = self.node_index.get(entity_id) else {
            return Vec::new();
        };
        let mut scored: Vec<(&str, usize)> = self
            .graph
            .edges(idx)
            .filter_map(|edge| {
                let other = if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                };
                let id = self.graph.node_weight(other)?;
                (!exclude.contains(id)).then_some((id.as_str(), edge.weight().strength()))
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        scored
            .into_iter()
            .take(limit)
            .map(|(id, _)| id.to_string())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
