//! Layout engine for computing card positions and connector lines
//!
//! This module takes a resolved hierarchy, places its cards for the selected
//! view mode and routes connectors between the placed cards.

pub mod config;
pub mod engine;
pub mod routing;
pub mod stack;
pub mod types;

pub use config::LayoutConfig;
pub use engine::{compute, place_tree};
pub use routing::{parent_segments, route_connectors, segments_for};
pub use types::*;

use crate::hierarchy::Hierarchy;

/// Place cards for `mode`, then route connectors over the placed snapshot
pub fn layout_chart(
    hierarchy: &Hierarchy,
    mode: ViewMode,
    config: &LayoutConfig,
    hovered: Option<&str>,
) -> ChartLayout {
    let mut layout = match mode {
        ViewMode::Tree => engine::compute(hierarchy, config, hovered),
        ViewMode::Stack => stack::compute(hierarchy, config, hovered),
    };
    route_connectors(&mut layout, hierarchy, config);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{resolve_visible_set, Filter, ViewOptions};
    use crate::model::Person;

    fn hierarchy() -> Hierarchy {
        let people = vec![
            Person::new("1", "Alice"),
            Person::new("2", "Bob").with_manager("1"),
            Person::new("3", "Carol").with_manager("1"),
        ];
        Hierarchy::new(
            resolve_visible_set(&people, &[], &Filter::All),
            ViewOptions::default().with_add_slots(false),
        )
    }

    #[test]
    fn test_tree_layout_has_connectors() {
        let layout = layout_chart(&hierarchy(), ViewMode::Tree, &LayoutConfig::default(), None);
        assert_eq!(layout.cards.len(), 3);
        assert_eq!(layout.segments.len(), 4);
    }

    #[test]
    fn test_stack_layout_has_none() {
        let layout = layout_chart(&hierarchy(), ViewMode::Stack, &LayoutConfig::default(), None);
        assert_eq!(layout.cards.len(), 3);
        assert!(layout.segments.is_empty());
    }

    #[test]
    fn test_rerouting_is_idempotent() {
        let h = hierarchy();
        let config = LayoutConfig::default();
        let mut layout = layout_chart(&h, ViewMode::Tree, &config, None);
        let first = layout.segments.clone();
        route_connectors(&mut layout, &h, &config);
        assert_eq!(layout.segments, first);
    }
}
