//! Configuration for the layout engine

use crate::hierarchy::guard::MAX_RENDER_DEPTH;
use crate::hierarchy::tree::DEFAULT_ADD_SLOT_EXCLUSIONS;

/// Configuration options for layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Tree-view person card size (width, height)
    pub card_size: (f64, f64),

    /// "Add member" slot size (width, height)
    pub add_slot_size: (f64, f64),

    /// Circular-reference / max-depth placeholder size (width, height)
    pub placeholder_size: (f64, f64),

    /// Distance from a parent's bottom edge to the connector trunk line
    pub trunk_offset: f64,

    /// Vertical spacer above a report block and above each report
    pub report_spacer: f64,

    /// Horizontal gap between sibling subtrees
    pub sibling_gap: f64,

    /// Vertical gap between rows of reports
    pub row_gap: f64,

    /// Reports per row when row limiting is on
    pub members_per_row: usize,

    /// Deepest level rendered below a root
    pub max_depth: usize,

    /// Names that never get an add slot
    pub add_slot_exclusions: Vec<String>,

    /// Container width; roots are centred in it when wider than the chart
    pub viewport_width: Option<f64>,

    /// Stack-view card size (width, height)
    pub stack_card_size: (f64, f64),

    /// Horizontal gap between stack-view cards
    pub stack_gap: f64,

    /// Vertical gap between stack-view rows
    pub stack_row_gap: f64,

    /// Indent per hierarchy level in the stack view
    pub stack_level_indent: f64,

    /// Extra indent of continuation rows in the stack view
    pub stack_continuation_indent: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_size: (220.0, 180.0),
            add_slot_size: (220.0, 160.0),
            placeholder_size: (220.0, 80.0),
            trunk_offset: 30.0,
            report_spacer: 30.0,
            sibling_gap: 40.0,
            row_gap: 60.0,
            members_per_row: 4,
            max_depth: MAX_RENDER_DEPTH,
            add_slot_exclusions: DEFAULT_ADD_SLOT_EXCLUSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            viewport_width: None,
            stack_card_size: (160.0, 90.0),
            stack_gap: 16.0,
            stack_row_gap: 12.0,
            stack_level_indent: 32.0,
            stack_continuation_indent: 176.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tree-view card size
    pub fn with_card_size(mut self, width: f64, height: f64) -> Self {
        self.card_size = (width, height);
        self
    }

    /// Set the trunk offset below parent cards
    pub fn with_trunk_offset(mut self, offset: f64) -> Self {
        self.trunk_offset = offset;
        self
    }

    /// Set the gap between sibling subtrees
    pub fn with_sibling_gap(mut self, gap: f64) -> Self {
        self.sibling_gap = gap;
        self
    }

    /// Set how many reports share a row
    pub fn with_members_per_row(mut self, count: usize) -> Self {
        self.members_per_row = count.max(1);
        self
    }

    /// Set the depth ceiling
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the container width used for centring
    pub fn with_viewport_width(mut self, width: Option<f64>) -> Self {
        self.viewport_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.card_size, (220.0, 180.0));
        assert_eq!(config.add_slot_size, (220.0, 160.0));
        assert_eq!(config.trunk_offset, 30.0);
        assert_eq!(config.sibling_gap, 40.0);
        assert_eq!(config.row_gap, 60.0);
        assert_eq!(config.members_per_row, 4);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.add_slot_exclusions, vec!["Admin User".to_string()]);
        assert!(config.viewport_width.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_card_size(150.0, 75.0)
            .with_members_per_row(0)
            .with_viewport_width(Some(1200.0));

        assert_eq!(config.card_size, (150.0, 75.0));
        assert_eq!(config.members_per_row, 1);
        assert_eq!(config.viewport_width, Some(1200.0));
    }
}
