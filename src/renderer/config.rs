//! SVG output options

/// How a chart layout is written out as SVG
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Margin added around the chart bounds in the viewBox
    pub viewbox_padding: f64,

    /// Emit the XML declaration
    pub standalone: bool,

    /// One element per line, indented
    pub pretty_print: bool,

    /// Prefix for class names and group ids ("oc-" gives `oc-card-7`)
    pub class_prefix: Option<String>,

    pub font_family: String,

    /// Corner radius of cards, add slots and placeholders
    pub corner_radius: f64,

    pub connector_width: f64,

    /// `stroke-dasharray` for connectors that lead to an add slot
    pub connector_dash: String,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 60.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("oc-".to_string()),
            font_family: "Segoe UI, Helvetica, Arial, sans-serif".to_string(),
            corner_radius: 8.0,
            connector_width: 2.0,
            connector_dash: "8 4".to_string(),
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Bare class names and ids
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Stroke width and dash pattern for connector lines
    pub fn with_connector_style(mut self, width: f64, dash: impl Into<String>) -> Self {
        self.connector_width = width;
        self.connector_dash = dash.into();
        self
    }
}
