use serde::{Deserialize, Serialize};

use super::scored::ScoredEntity;

/// One path through the entity network, root first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityContext {
    pub entities: Vec<ScoredEntity>,
}

impl EntityContext {
    pub fn new(entities: Vec<ScoredEntity>) -> Self {
        Self { entities }
    }

    pub fn root(&self) -> Option<&ScoredEntity> {
        self.entities.first()
    }

    /// Number of hops below the root.
    pub fn depth(&self) -> usize {
        self.entities.len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.entity.entity_id.as_str())
    }

    pub fn values(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.entity.value.as_str()).collect()
    }

    /// Mean degree centrality along the path.
    pub fn mean_score(&self) -> f64 {
        if self.entities.is_empty() {
            return 0.0;
        }
        self.entities.iter().map(|e| e.score).sum::<f64>() / self.entities.len() as f64
    }
}

/// The query's entity network contexts, best first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityContexts {
    pub contexts: Vec<EntityContext>,
}

impl EntityContexts {
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Distinct entity ids across every context, in first-seen order.
    pub fn entity_ids(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.contexts
            .iter()
            .flat_map(|c| c.entity_ids())
            .filter(|id| seen.insert(*id))
            .map(str::to_string)
            .collect()
    }
}
