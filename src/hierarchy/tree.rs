//! Pure render tree for the tree view
//!
//! The tree is a function of the hierarchy and externally owned UI state
//! (hovered card); nothing is cached between builds.

use tracing::error;

use crate::model::Person;

use super::guard::{AncestorPath, Descent, MAX_RENDER_DEPTH};
use super::relation::Hierarchy;

/// Account names that never get an "add member" slot
pub const DEFAULT_ADD_SLOT_EXCLUSIONS: &[&str] = &["Admin User"];

/// A rendered person card and everything below it
#[derive(Debug, Clone, PartialEq)]
pub struct CardNode {
    pub id: String,
    pub level: usize,
    pub team_lead: bool,
    pub hovered: bool,
    pub reports: Vec<ChartNode>,
    /// Whether an "add member" slot follows the reports
    pub add_slot: bool,
}

/// One node in the render tree
#[derive(Debug, Clone, PartialEq)]
pub enum ChartNode {
    Card(CardNode),
    /// Person already on the path from the root
    CircularReference { id: String, level: usize },
    /// Person below the depth ceiling
    MaxDepth { id: String, level: usize },
}

impl ChartNode {
    pub fn id(&self) -> &str {
        match self {
            ChartNode::Card(card) => &card.id,
            ChartNode::CircularReference { id, .. } | ChartNode::MaxDepth { id, .. } => id,
        }
    }

    pub fn as_card(&self) -> Option<&CardNode> {
        match self {
            ChartNode::Card(card) => Some(card),
            _ => None,
        }
    }

    /// Number of person cards in this subtree
    pub fn card_count(&self) -> usize {
        match self {
            ChartNode::Card(card) => 1 + card.reports.iter().map(ChartNode::card_count).sum::<usize>(),
            _ => 0,
        }
    }
}

/// Builds the render tree from a hierarchy
#[derive(Debug, Clone)]
pub struct TreeBuilder<'a> {
    hierarchy: &'a Hierarchy,
    hovered: Option<&'a str>,
    max_depth: usize,
    add_slot_exclusions: Vec<String>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(hierarchy: &'a Hierarchy) -> Self {
        Self {
            hierarchy,
            hovered: None,
            max_depth: MAX_RENDER_DEPTH,
            add_slot_exclusions: DEFAULT_ADD_SLOT_EXCLUSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_hovered(mut self, hovered: Option<&'a str>) -> Self {
        self.hovered = hovered;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_add_slot_exclusions(mut self, names: Vec<String>) -> Self {
        self.add_slot_exclusions = names;
        self
    }

    /// One node per root; roots hidden by the inactive toggle are skipped
    pub fn build(&self) -> Vec<ChartNode> {
        self.hierarchy
            .roots()
            .into_iter()
            .filter_map(|root| self.node(root, &AncestorPath::new()))
            .collect()
    }

    fn node(&self, person: &Person, path: &AncestorPath) -> Option<ChartNode> {
        let level = path.depth();
        match path.check(&person.id, self.max_depth) {
            Descent::Cycle => {
                error!(id = %person.id, name = %person.name, "circular reference detected");
                return Some(ChartNode::CircularReference {
                    id: person.id.clone(),
                    level,
                });
            }
            Descent::TooDeep => {
                error!(id = %person.id, name = %person.name, "max depth reached");
                return Some(ChartNode::MaxDepth {
                    id: person.id.clone(),
                    level,
                });
            }
            Descent::Enter => {}
        }

        let options = self.hierarchy.options();
        if !options.show_inactive && !person.is_active() {
            return None;
        }

        let children = self.hierarchy.children_of(&person.id);
        let below = path.with(&person.id);
        let reports: Vec<ChartNode> = children
            .iter()
            .filter_map(|child| self.node(child, &below))
            .collect();

        let add_slot = options.show_add_slots
            && !self.add_slot_exclusions.contains(&person.name)
            && (level == 0 || !children.is_empty());

        Some(ChartNode::Card(CardNode {
            id: person.id.clone(),
            level,
            team_lead: self.hierarchy.is_team_lead(&person.id),
            hovered: self.hovered == Some(person.id.as_str()),
            reports,
            add_slot,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::relation::ViewOptions;
    use crate::hierarchy::resolver::{resolve_visible_set, Filter};
    use crate::model::{Status, Team};

    fn build(people: &[Person], options: ViewOptions) -> Vec<ChartNode> {
        let h = Hierarchy::new(resolve_visible_set(people, &[], &Filter::All), options);
        TreeBuilder::new(&h).build()
    }

    #[test]
    fn test_simple_tree() {
        let people = vec![
            Person::new("1", "Alice"),
            Person::new("2", "Bob").with_manager("1"),
            Person::new("3", "Carol").with_manager("1"),
        ];
        let tree = build(&people, ViewOptions::default());
        assert_eq!(tree.len(), 1);
        let root = tree[0].as_card().unwrap();
        assert_eq!(root.level, 0);
        assert!(root.add_slot);
        let report_ids: Vec<&str> = root.reports.iter().map(ChartNode::id).collect();
        assert_eq!(report_ids, vec!["2", "3"]);
        // Leaves below the root get no slot
        assert!(!root.reports[0].as_card().unwrap().add_slot);
        assert_eq!(tree[0].card_count(), 3);
    }

    #[test]
    fn test_add_slot_rules() {
        let people = vec![
            Person::new("1", "Admin User"),
            Person::new("2", "Bob").with_manager("1"),
            Person::new("3", "Carol").with_manager("2"),
        ];
        let tree = build(&people, ViewOptions::default());
        let admin = tree[0].as_card().unwrap();
        assert!(!admin.add_slot);
        assert!(admin.reports[0].as_card().unwrap().add_slot);

        let tree = build(&people, ViewOptions::default().with_add_slots(false));
        assert!(!tree[0].as_card().unwrap().reports[0].as_card().unwrap().add_slot);
    }

    #[test]
    fn test_inactive_manager_with_reports_gets_slot() {
        let people = vec![
            Person::new("1", "Alice"),
            Person::new("2", "Vacancy")
                .with_manager("1")
                .with_status(Status::Inactive),
            Person::new("3", "Carol").with_manager("2"),
        ];
        let tree = build(&people, ViewOptions::default());
        let vacancy = tree[0].as_card().unwrap().reports[0].as_card().unwrap();
        assert_eq!(vacancy.id, "2");
        assert!(vacancy.add_slot);
    }

    #[test]
    fn test_hidden_inactive_root_skipped() {
        let people = vec![Person::new("1", "Alice").with_status(Status::Inactive)];
        assert!(build(&people, ViewOptions::default().with_show_inactive(false)).is_empty());
        assert_eq!(build(&people, ViewOptions::default()).len(), 1);
    }

    #[test]
    fn test_depth_ceiling_placeholder() {
        let mut people = vec![Person::new("0", "P0")];
        for i in 1..15 {
            people.push(Person::new(i.to_string(), format!("P{}", i)).with_manager((i - 1).to_string()));
        }
        let tree = build(&people, ViewOptions::default());
        let mut node = &tree[0];
        let mut depth = 0;
        while let ChartNode::Card(card) = node {
            node = &card.reports[0];
            depth += 1;
        }
        assert_eq!(depth, MAX_RENDER_DEPTH + 1);
        assert!(matches!(node, ChartNode::MaxDepth { level, .. } if *level == MAX_RENDER_DEPTH + 1));
    }

    #[test]
    fn test_team_lead_flag_and_hover() {
        let people = vec![
            Person::new("1", "Alice"),
            Person::new("2", "Bob").with_manager("1"),
        ];
        let teams = vec![Team::new("t", "T").with_lead("1").with_members(["2"])];
        let h = Hierarchy::new(
            resolve_visible_set(&people, &teams, &Filter::Team("t".to_string())),
            ViewOptions::default(),
        );
        let tree = TreeBuilder::new(&h).with_hovered(Some("2")).build();
        let lead = tree[0].as_card().unwrap();
        assert!(lead.team_lead);
        assert!(!lead.hovered);
        assert!(lead.reports[0].as_card().unwrap().hovered);
    }
}
