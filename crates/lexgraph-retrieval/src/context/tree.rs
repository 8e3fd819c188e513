//! Expansion tree and the paths read off it.

use std::collections::{HashMap, HashSet};

use lexgraph_core::models::ScoredEntity;

use super::pruning::CentralityBand;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub entity_id: String,
    pub depth: usize,
    pub children: Vec<usize>,
}

/// Arena of expansion trees, one per root. Each entity appears at most once.
#[derive(Debug, Clone, Default)]
pub struct ContextTree {
    nodes: Vec<TreeNode>,
    roots: Vec<usize>,
}

impl ContextTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, entity_id: &str) -> usize {
        let idx = self.push(entity_id, 0);
        self.roots.push(idx);
        idx
    }

    pub fn add_child(&mut self, parent: usize, entity_id: &str) -> usize {
        let depth = self.nodes[parent].depth + 1;
        let idx = self.push(entity_id, depth);
        self.nodes[parent].children.push(idx);
        idx
    }

    fn push(&mut self, entity_id: &str, depth: usize) -> usize {
        self.nodes.push(TreeNode {
            entity_id: entity_id.to_string(),
            depth,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    pub fn node(&self, idx: usize) -> &TreeNode {
        &self.nodes[idx]
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn root_ids(&self) -> Vec<&str> {
        self.roots
            .iter()
            .map(|&r| self.nodes[r].entity_id.as_str())
            .collect()
    }

    /// Every entity id in the forest, in insertion order.
    pub fn entity_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.entity_id.clone()).collect()
    }

    /// Deepest level reached; roots are level 0.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Largest child count of any node whose children sit at `level`.
    pub fn max_fan_out(&self, level: usize) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.depth + 1 == level)
            .map(|n| n.children.len())
            .max()
            .unwrap_or(0)
    }

    /// Root-to-leaf id paths in depth-first order.
    pub fn leaf_paths(&self) -> Vec<Vec<&str>> {
        let mut paths = Vec::new();
        for &root in &self.roots {
            let mut stack = vec![(root, vec![self.nodes[root].entity_id.as_str()])];
            // Reverse push keeps children in insertion order.
            while let Some((idx, path)) = stack.pop() {
                let node = &self.nodes[idx];
                if node.children.is_empty() {
                    paths.push(path);
                    continue;
                }
                for &child in node.children.iter().rev() {
                    let mut next = path.clone();
                    next.push(self.nodes[child].entity_id.as_str());
                    stack.push((child, next));
                }
            }
        }
        paths
    }
}

/// Read entity paths off the tree, skipping entities outside the band while
/// keeping their descendants. Entities without details are skipped as well.
pub fn pruned_paths(
    tree: &ContextTree,
    entities: &HashMap<String, ScoredEntity>,
    band: CentralityBand,
) -> Vec<Vec<ScoredEntity>> {
    tree.leaf_paths()
        .into_iter()
        .map(|ids| {
            ids.into_iter()
                .filter_map(|id| entities.get(id))
                .filter(|e| band.admits(e.score))
                .cloned()
                .collect::<Vec<_>>()
        })
        .filter(|path| !path.is_empty())
        .collect()
}

fn ids_of(path: &[ScoredEntity]) -> Vec<&str> {
    path.iter().map(|e| e.entity.entity_id.as_str()).collect()
}

fn values_of(path: &[ScoredEntity]) -> Vec<String> {
    path.iter().map(|e| e.entity.value.to_lowercase()).collect()
}

/// Drop paths whose id sequence equals or prefixes another path's. The first
/// of several identical paths survives.
pub fn remove_partial_paths(paths: Vec<Vec<ScoredEntity>>) -> Vec<Vec<ScoredEntity>> {
    let keys: Vec<Vec<&str>> = paths.iter().map(|p| ids_of(p)).collect();
    let keep: Vec<bool> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            !keys.iter().enumerate().any(|(j, other)| {
                i != j
                    && other.starts_with(key)
                    && (other.len() > key.len() || j < i)
            })
        })
        .collect();
    paths
        .into_iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(p))
        .collect()
}

/// Drop paths whose lower-cased value sequence equals or prefixes another
/// path's, so differently-identified entities with the same names collapse.
pub fn dedup_by_value(paths: Vec<Vec<ScoredEntity>>) -> Vec<Vec<ScoredEntity>> {
    let keys: Vec<Vec<String>> = paths.iter().map(|p| values_of(p)).collect();
    let mut seen: HashSet<&[String]> = HashSet::new();
    let keep: Vec<bool> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let prefixed = keys
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && other.len() > key.len() && other.starts_with(key));
            !prefixed && seen.insert(key.as_slice())
        })
        .collect();
    paths
        .into_iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgraph_core::models::Entity;

    fn se(id: &str, value: &str, score: f64) -> ScoredEntity {
        ScoredEntity::new(
            Entity {
                entity_id: id.into(),
                value: value.into(),
                classification: "Thing".into(),
            },
            score,
        )
    }

    fn path_ids(paths: &[Vec<ScoredEntity>]) -> Vec<String> {
        paths
            .iter()
            .map(|p| ids_of(p).join(">"))
            .collect()
    }

    fn sample_tree() -> ContextTree {
        // r ─┬─ a ── c
        //    └─ b
        let mut t = ContextTree::new();
        let r = t.add_root("r");
        let a = t.add_child(r, "a");
        t.add_child(r, "b");
        t.add_child(a, "c");
        t
    }

    #[test]
    fn leaf_paths_are_depth_first() {
        let t = sample_tree();
        assert_eq!(t.leaf_paths(), vec![vec!["r", "a", "c"], vec!["r", "b"]]);
        assert_eq!(t.depth(), 2);
        assert_eq!(t.max_fan_out(1), 2);
        assert_eq!(t.max_fan_out(2), 1);
    }

    #[test]
    fn pruned_entity_is_skipped_but_descendants_kept() {
        let t = sample_tree();
        let entities: HashMap<String, ScoredEntity> = [
            se("r", "R", 4.0),
            se("a", "A", 100.0),
            se("b", "B", 4.0),
            se("c", "C", 2.0),
        ]
        .into_iter()
        .map(|e| (e.entity.entity_id.clone(), e))
        .collect();
        let band = CentralityBand::new(4.0, 0.25, 3.0);
        let paths = pruned_paths(&t, &entities, band);
        assert_eq!(path_ids(&paths), vec!["r>c", "r>b"]);
    }

    #[test]
    fn partial_paths_are_removed() {
        let paths = vec![
            vec![se("r", "R", 1.0)],
            vec![se("r", "R", 1.0), se("a", "A", 1.0)],
            vec![se("r", "R", 1.0), se("a", "A", 1.0)],
            vec![se("r", "R", 1.0), se("b", "B", 1.0)],
        ];
        assert_eq!(path_ids(&remove_partial_paths(paths)), vec!["r>a", "r>b"]);
    }

    #[test]
    fn value_prefixes_are_deduplicated() {
        let paths = vec![
            vec![se("x1", "Neptune", 1.0), se("y", "Gremlin", 1.0)],
            vec![se("x2", "neptune", 1.0)],
            vec![se("x3", "NEPTUNE", 1.0), se("z", "Gremlin", 1.0)],
            vec![se("q", "SPARQL", 1.0)],
        ];
        assert_eq!(path_ids(&dedup_by_value(paths)), vec!["x1>y", "q"]);
    }
}
