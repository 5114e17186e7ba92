//! Org Chart - hierarchy resolution and layout for organisation charts
//!
//! This library turns a people/teams snapshot into a drawable chart: it
//! resolves which people a filter shows, builds the reporting tree with
//! cycle and depth guards, places cards and routes connector lines, and
//! renders the result as SVG or JSON.
//!
//! # Example
//!
//! ```rust
//! use orgchart::render;
//!
//! let svg = render(r#"{"users": [{"id": 1, "name": "Alice", "email": "a@x", "role": "CEO"}]}"#).unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("Alice"));
//! ```

pub mod error;
pub mod hierarchy;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod stylesheet;
pub mod view;

pub use error::{IntegrityFault, SnapshotError};
pub use hierarchy::{resolve_visible_set, Filter, Hierarchy, ViewOptions, VisibleSet};
pub use layout::{layout_chart, route_connectors, ChartLayout, LayoutConfig, Segment, ViewMode};
pub use model::{Person, Snapshot, Status, Team};
pub use renderer::{render_json, render_svg, render_svg_with_stylesheet, SvgConfig};
pub use view::ChartView;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

// Re-export Stylesheet for public API
pub use stylesheet::{Stylesheet, StylesheetError};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Snapshot could not be read or parsed
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Stylesheet could not be read or parsed
    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),

    /// Layout could not be serialized
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Display toggles
    pub options: ViewOptions,
    /// Which part of the organisation to draw
    pub filter: Filter,
    /// Tree or stack rendering
    pub mode: ViewMode,
    /// Card drawn in its hovered state
    pub hovered: Option<String>,
    /// Debug mode: log every placed card
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Load the stylesheet from a TOML file
    pub fn with_stylesheet_file(self, path: &Path) -> Result<Self, RenderError> {
        let stylesheet = Stylesheet::from_file(path)?;
        Ok(self.with_stylesheet(stylesheet))
    }

    pub fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_hovered(mut self, id: Option<String>) -> Self {
        self.hovered = id;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Resolve, place and route a snapshot
///
/// Integrity faults in the snapshot are logged and otherwise ignored.
pub fn compute_chart(snapshot: &Snapshot, config: &RenderConfig) -> (Hierarchy, ChartLayout) {
    for fault in snapshot.integrity_faults() {
        warn!(%fault, "data integrity fault");
    }

    let people = snapshot.people();
    let teams = snapshot.teams();
    let visible = resolve_visible_set(&people, &teams, &config.filter);
    let hierarchy = Hierarchy::new(visible, config.options);
    let layout = layout_chart(
        &hierarchy,
        config.mode,
        &config.layout,
        config.hovered.as_deref(),
    );

    if config.debug {
        debug!("=== Layout Debug ===");
        for card in layout.cards.cards() {
            let b = card.bounds;
            debug!(
                kind = ?card.kind,
                "x={:.1} y={:.1} w={:.1} h={:.1}",
                b.x,
                b.y,
                b.width,
                b.height
            );
        }
        debug!(segments = layout.segments.len(), "====================");
    }

    (hierarchy, layout)
}

/// Render a JSON snapshot to SVG with default configuration
pub fn render(json: &str) -> Result<String, RenderError> {
    render_with_config(json, RenderConfig::default())
}

/// Render a JSON snapshot to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use orgchart::{render_with_config, RenderConfig, SvgConfig, ViewMode};
///
/// let json = r#"{
///     "users": [
///         {"id": 1, "name": "Alice", "email": "a@x", "role": "CEO"},
///         {"id": 2, "name": "Bob", "email": "b@x", "role": "CTO", "line_manager": 1}
///     ]
/// }"#;
/// let config = RenderConfig::new()
///     .with_mode(ViewMode::Stack)
///     .with_svg(SvgConfig::default().with_viewbox_padding(20.0));
///
/// let svg = render_with_config(json, config).unwrap();
/// assert!(svg.contains("Bob"));
/// ```
pub fn render_with_config(json: &str, config: RenderConfig) -> Result<String, RenderError> {
    let snapshot = Snapshot::from_json(json)?;
    let (hierarchy, layout) = compute_chart(&snapshot, &config);
    Ok(render_svg_with_stylesheet(
        &layout,
        &hierarchy,
        &config.svg,
        &config.stylesheet,
    ))
}

/// Render a JSON snapshot to the JSON card/segment geometry
pub fn render_segments(json: &str, config: RenderConfig) -> Result<String, RenderError> {
    let snapshot = Snapshot::from_json(json)?;
    let (_, layout) = compute_chart(&snapshot, &config);
    Ok(render_json(&layout)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORG: &str = r#"{
        "users": [
            {"id": 1, "name": "Alice", "email": "alice@example.com", "role": "CEO"},
            {"id": 2, "name": "Bob", "email": "bob@example.com", "role": "CTO", "line_manager": 1},
            {"id": 3, "name": "Carol", "email": "carol@example.com", "role": "CFO", "line_manager": 1}
        ],
        "drafts": [
            {"id": 9, "position_title": "Position Open", "line_manager": 2, "status": "open"}
        ],
        "teams": [
            {"id": 5, "name": "Platform", "lead_id": 2, "members": [3]}
        ]
    }"#;

    #[test]
    fn test_render_full_org() {
        let svg = render(ORG).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Alice"));
        assert!(svg.contains("Position Open"));
        assert!(svg.contains("oc-connector"));
    }

    #[test]
    fn test_render_team_filter() {
        let config = RenderConfig::new().with_filter(Filter::Team("5".to_string()));
        let svg = render_with_config(ORG, config).unwrap();
        assert!(svg.contains(r#"id="oc-card-2""#));
        assert!(svg.contains(r#"id="oc-card-3""#));
        // Alice is pulled in by chain climbing but is not drawn under the lead
        assert!(!svg.contains(r#"id="oc-card-1""#));
        assert!(!svg.contains(r#"id="oc-card-draft-9""#));
    }

    #[test]
    fn test_unknown_team_falls_back_to_all() {
        let config = RenderConfig::new().with_filter(Filter::Team("missing".to_string()));
        let svg = render_with_config(ORG, config).unwrap();
        assert!(svg.contains(r#"id="oc-card-3""#));
    }

    #[test]
    fn test_render_segments_json() {
        let config = RenderConfig::new().with_options(ViewOptions::default().with_add_slots(false));
        let json = render_segments(ORG, config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        // Alice -> Bob, Carol: trunk + span + 2 drops; Bob -> vacancy: trunk + drop
        assert_eq!(value["segments"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_invalid_json_error() {
        let result = render("{not json");
        assert!(matches!(
            result,
            Err(RenderError::Snapshot(SnapshotError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_stylesheet_error() {
        let result = RenderConfig::new().with_stylesheet_file(Path::new("/nonexistent/style.toml"));
        assert!(matches!(
            result,
            Err(RenderError::Stylesheet(StylesheetError::IoError(_)))
        ));
    }
}
