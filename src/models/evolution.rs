//! Evolution tree models and pure traversal operations.

use serde::{Deserialize, Serialize};

use super::entity::humanize;
use super::Entity;

/// Text used when a transition has no recognizable condition.
pub const NATURAL_EVOLUTION: &str = "Natural evolution";

/// A node of a built evolution tree.
///
/// The root is the base (unevolved) form at depth 0 and has no requirement.
/// Children keep the order of the source graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub entity: Entity,
    /// How this node is reached from its parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<Requirement>,
    /// Distance from the root.
    pub depth: usize,
    pub children: Vec<EvolutionNode>,
}

/// Conditions gating a single evolution transition.
///
/// Sparse: absent facts stay `None` and are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_move: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_move_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_happiness: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_beauty: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_affection: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_physical_stats: Option<i8>,
}

impl Requirement {
    /// Human-readable clauses in fixed order: level, item, time of day,
    /// gender, known move, known move type, happiness, affection, relative
    /// physical stats.
    pub fn clauses(&self) -> Vec<String> {
        let mut clauses = Vec::new();

        if let Some(level) = self.min_level {
            clauses.push(format!("Level {}", level));
        }
        if let Some(item) = &self.item {
            clauses.push(format!("Use {}", humanize(item)));
        }
        if let Some(time) = &self.time_of_day {
            clauses.push(if time == "day" {
                "During the day".to_string()
            } else {
                "During the night".to_string()
            });
        }
        if let Some(gender) = self.gender {
            clauses.push(if gender == 1 {
                "Female only".to_string()
            } else {
                "Male only".to_string()
            });
        }
        if let Some(known_move) = &self.known_move {
            clauses.push(format!("Knows {}", humanize(known_move)));
        }
        if let Some(move_type) = &self.known_move_type {
            clauses.push(format!("Knows a {}-type move", humanize(move_type)));
        }
        if let Some(happiness) = self.min_happiness {
            clauses.push(format!("Happiness {}+", happiness));
        }
        if let Some(affection) = self.min_affection {
            clauses.push(format!("Affection {}+", affection));
        }
        match self.relative_physical_stats {
            Some(1) => clauses.push("Attack > Defense".to_string()),
            Some(-1) => clauses.push("Defense > Attack".to_string()),
            Some(0) => clauses.push("Attack = Defense".to_string()),
            _ => {}
        }

        clauses
    }
}

/// Render a requirement as `" + "`-joined clauses.
pub fn requirement_text(requirement: Option<&Requirement>) -> String {
    let clauses = requirement.map(Requirement::clauses).unwrap_or_default();
    if clauses.is_empty() {
        NATURAL_EVOLUTION.to_string()
    } else {
        clauses.join(" + ")
    }
}

impl EvolutionNode {
    /// A node with no children.
    pub fn leaf(entity: Entity, requirement: Option<Requirement>, depth: usize) -> Self {
        Self {
            entity,
            requirement,
            depth,
            children: Vec::new(),
        }
    }

    /// Number of nodes below this one.
    pub fn total_descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.total_descendant_count())
            .sum()
    }

    /// Length of the longest path to a leaf, in edges.
    pub fn max_depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// All entities in pre-order.
    pub fn flatten(&self) -> Vec<&Entity> {
        let mut out = Vec::with_capacity(1 + self.total_descendant_count());
        self.collect_pre_order(&mut out);
        out
    }

    fn collect_pre_order<'a>(&'a self, out: &mut Vec<&'a Entity>) {
        out.push(&self.entity);
        for child in &self.children {
            child.collect_pre_order(out);
        }
    }

    pub fn can_evolve(&self) -> bool {
        !self.children.is_empty()
    }

    /// First descendant in pre-order whose entity has `id`. This node itself
    /// is never returned.
    pub fn find_descendant_by_entity_id(&self, id: u32) -> Option<&EvolutionNode> {
        self.children.iter().find_map(|child| child.find_node(id))
    }

    fn find_node(&self, id: u32) -> Option<&EvolutionNode> {
        if self.entity.id == id {
            return Some(self);
        }
        self.find_descendant_by_entity_id(id)
    }

    /// Entity of the node whose direct child has `id`.
    pub fn find_parent_of(&self, id: u32) -> Option<&Entity> {
        if self.children.iter().any(|child| child.entity.id == id) {
            return Some(&self.entity);
        }
        self.children
            .iter()
            .find_map(|child| child.find_parent_of(id))
    }

    /// Direct evolutions of the entity with `id`; empty when it is a final
    /// form or not in this tree.
    pub fn next_evolutions(&self, id: u32) -> &[EvolutionNode] {
        self.find_node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Requirement text for reaching this node.
    pub fn requirement_text(&self) -> String {
        requirement_text(self.requirement.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u32, name: &str) -> Entity {
        Entity {
            id,
            name: name.to_string(),
            types: vec!["normal".to_string()],
            abilities: vec![],
            base_stats: Default::default(),
            height: 1,
            weight: 1,
            image_url: String::new(),
            species_url: String::new(),
        }
    }

    /// base → stage1 → (stage2a, stage2b)
    fn branching() -> EvolutionNode {
        let mut stage1 = EvolutionNode::leaf(entity(2, "stage1"), None, 1);
        stage1.children = vec![
            EvolutionNode::leaf(entity(3, "stage2a"), None, 2),
            EvolutionNode::leaf(entity(4, "stage2b"), None, 2),
        ];
        let mut base = EvolutionNode::leaf(entity(1, "base"), None, 0);
        base.children = vec![stage1];
        base
    }

    #[test]
    fn test_branching_metrics() {
        let root = branching();
        assert_eq!(root.max_depth(), 2);
        assert_eq!(root.total_descendant_count(), 3);
        assert!(root.can_evolve());

        let names: Vec<_> = root.flatten().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["base", "stage1", "stage2a", "stage2b"]);
    }

    #[test]
    fn test_leaf_metrics() {
        let leaf = EvolutionNode::leaf(entity(132, "ditto"), None, 0);
        assert_eq!(leaf.max_depth(), 0);
        assert_eq!(leaf.total_descendant_count(), 0);
        assert!(!leaf.can_evolve());
        assert_eq!(leaf.flatten().len(), 1);
    }

    #[test]
    fn test_find_descendant_and_parent() {
        let root = branching();
        assert_eq!(
            root.find_descendant_by_entity_id(4).map(|n| n.entity.name.as_str()),
            Some("stage2b")
        );
        assert_eq!(root.find_descendant_by_entity_id(99), None);
        assert_eq!(root.find_descendant_by_entity_id(1), None);
        assert_eq!(
            root.find_descendant_by_entity_id(2).map(|n| n.depth),
            Some(1)
        );
        assert_eq!(root.find_parent_of(3).map(|e| e.id), Some(2));
        assert_eq!(root.find_parent_of(2).map(|e| e.id), Some(1));
        assert_eq!(root.find_parent_of(1), None);
    }

    #[test]
    fn test_next_evolutions() {
        let root = branching();
        let next: Vec<_> = root.next_evolutions(2).iter().map(|n| n.entity.id).collect();
        assert_eq!(next, vec![3, 4]);
        let from_root: Vec<_> = root.next_evolutions(1).iter().map(|n| n.entity.id).collect();
        assert_eq!(from_root, vec![2]);
        assert!(root.next_evolutions(4).is_empty());
        assert!(root.next_evolutions(99).is_empty());
    }

    #[test]
    fn test_requirement_text_order() {
        let requirement = Requirement {
            trigger: Some("level-up".to_string()),
            relative_physical_stats: Some(-1),
            min_affection: Some(2),
            min_happiness: Some(160),
            known_move_type: Some("fairy".to_string()),
            known_move: Some("ancient-power".to_string()),
            gender: Some(1),
            time_of_day: Some("night".to_string()),
            item: Some("moon-stone".to_string()),
            min_level: Some(20),
            ..Default::default()
        };
        assert_eq!(
            requirement_text(Some(&requirement)),
            "Level 20 + Use Moon stone + During the night + Female only + Knows Ancient power \
             + Knows a Fairy-type move + Happiness 160+ + Affection 2+ + Defense > Attack"
        );
    }

    #[test]
    fn test_requirement_text_natural() {
        assert_eq!(requirement_text(None), NATURAL_EVOLUTION);
        let trade_only = Requirement {
            trigger: Some("trade".to_string()),
            ..Default::default()
        };
        assert_eq!(requirement_text(Some(&trade_only)), NATURAL_EVOLUTION);
    }

    #[test]
    fn test_requirement_text_equal_stats() {
        let tyrogue = Requirement {
            min_level: Some(20),
            relative_physical_stats: Some(0),
            ..Default::default()
        };
        assert_eq!(requirement_text(Some(&tyrogue)), "Level 20 + Attack = Defense");
    }

    #[test]
    fn test_requirement_serialization_omits_absent_fields() {
        let requirement = Requirement {
            relative_physical_stats: Some(0),
            ..Default::default()
        };
        let json = serde_json::to_string(&requirement).unwrap();
        assert_eq!(json, r#"{"relativePhysicalStats":0}"#);
    }
}
