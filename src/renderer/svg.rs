//! SVG generation from chart layouts

use crate::hierarchy::Hierarchy;
use crate::layout::{BoundingBox, CardKind, ChartLayout, PlacedCard, Segment, ViewMode};
use crate::model::Person;
use crate::stylesheet::Stylesheet;

use super::SvgConfig;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    connections: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            connections: vec![],
            indent: 1,
        }
    }

    /// Add one CSS custom property per palette token
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let mut css = String::from(":root {\n");
        for (token, value) in stylesheet.palette() {
            css.push_str(&format!("    --{}: {};\n", token, value));
        }
        css.push_str("  }\n");
        css.push_str(&format!(
            "  .{}text {{ font-family: {}; }}",
            self.prefix(),
            self.config.font_family
        ));
        self.styles.push(css);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn class_list(&self, kind: &str, classes: &[String]) -> String {
        let prefix = self.prefix();
        std::iter::once(format!("{}{}", prefix, kind))
            .chain(classes.iter().map(|c| format!("{}{}", prefix, c)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Add a rounded rectangle
    pub fn add_rect(&mut self, bounds: &BoundingBox, radius: f64, classes: &[String], styles: &str) {
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}" rx="{}"{}/>"#,
            self.indent_str(),
            self.class_list("rect", classes),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            radius,
            styles
        ));
    }

    /// Add a circle element
    pub fn add_circle(&mut self, cx: f64, cy: f64, r: f64, classes: &[String], styles: &str) {
        self.elements.push(format!(
            r#"{}<circle class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            self.class_list("circle", classes),
            cx,
            cy,
            r,
            styles
        ));
    }

    /// Add a text element centred vertically on `y`
    pub fn add_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        anchor: TextAnchor,
        classes: &[String],
        styles: &str,
    ) {
        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="{}" dominant-baseline="middle"{}>{}</text>"#,
            self.indent_str(),
            self.class_list("text", classes),
            x,
            y,
            anchor.as_str(),
            styles,
            escape_xml(text)
        ));
    }

    /// Add a connector line
    pub fn add_connector(&mut self, segment: &Segment, styles: &str) {
        let classes = if segment.dashed {
            vec!["dashed".to_string()]
        } else {
            vec![]
        };
        self.connections.push(format!(
            r#"{}<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            self.indent_str(),
            self.class_list("connector", &classes),
            segment.from.x,
            segment.from.y,
            segment.to.x,
            segment.to.y,
            styles
        ));
    }

    /// Add a group element with optional ID and classes
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String]) {
        let prefix = self.prefix();
        let id_attr = id
            .map(|i| format!(r#" id="{}{}""#, prefix, escape_xml(i)))
            .unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, self.class_list(&classes[0], &classes[1..]))
        };

        self.elements
            .push(format!("{}<g{}{}>", self.indent_str(), id_attr, class_attr));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: BoundingBox) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewbox.x - padding;
        let vb_y = viewbox.y - padding;
        let vb_w = viewbox.width + 2.0 * padding;
        let vb_h = viewbox.height + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            vb_x, vb_y, vb_w, vb_h
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        // Connectors sit underneath the cards
        for conn in &self.connections {
            svg.push_str(conn);
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a chart layout to an SVG string (with default stylesheet)
pub fn render_svg(layout: &ChartLayout, hierarchy: &Hierarchy, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(layout, hierarchy, config, &Stylesheet::default())
}

/// Render a chart layout to an SVG string with a custom stylesheet
pub fn render_svg_with_stylesheet(
    layout: &ChartLayout,
    hierarchy: &Hierarchy,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    for segment in &layout.segments {
        let token = if segment.dashed { "line-add" } else { "line" };
        let mut styles = format!(
            r#" stroke="{}" stroke-width="{}""#,
            stylesheet.resolve_or_default(token),
            config.connector_width
        );
        if segment.dashed {
            styles.push_str(&format!(r#" stroke-dasharray="{}""#, config.connector_dash));
        }
        builder.add_connector(segment, &styles);
    }

    let painter = CardPainter {
        hierarchy,
        stylesheet,
        mode: layout.mode,
        radius: config.corner_radius,
    };
    for card in layout.cards.cards() {
        painter.paint(card, &mut builder);
    }

    builder.build(layout.bounds)
}

/// Draws individual cards with resolved colours
struct CardPainter<'a> {
    hierarchy: &'a Hierarchy,
    stylesheet: &'a Stylesheet,
    mode: ViewMode,
    radius: f64,
}

impl CardPainter<'_> {
    fn color(&self, token: &str) -> String {
        self.stylesheet.resolve_or_default(token)
    }

    fn fill_stroke(&self, fill: &str, stroke: &str, width: f64) -> String {
        format!(
            r#" fill="{}" stroke="{}" stroke-width="{}""#,
            self.color(fill),
            self.color(stroke),
            width
        )
    }

    fn text_style(&self, token: &str, size: f64, bold: bool) -> String {
        let weight = if bold { r#" font-weight="600""# } else { "" };
        format!(r#" fill="{}" font-size="{}"{}"#, self.color(token), size, weight)
    }

    fn paint(&self, card: &PlacedCard, builder: &mut SvgBuilder) {
        match &card.kind {
            CardKind::Member {
                id,
                level,
                team_lead,
                hovered,
            } => {
                // A card only exists for a visible person
                let Some(person) = self.hierarchy.person(id) else {
                    return;
                };
                builder.start_group(Some(&format!("card-{}", id)), &["member".to_string()]);
                match self.mode {
                    ViewMode::Tree => {
                        self.tree_member(person, &card.bounds, *level, *team_lead, *hovered, builder)
                    }
                    ViewMode::Stack => self.stack_member(person, &card.bounds, *level, builder),
                }
                builder.end_group();
            }
            CardKind::AddSlot { parent, level } => {
                builder.start_group(
                    Some(&format!("add-member-{}-level-{}", parent, level)),
                    &["add-slot".to_string()],
                );
                let b = &card.bounds;
                let mut styles = self.fill_stroke("add-slot", "add-slot-border", 2.0);
                styles.push_str(r#" stroke-dasharray="6 4""#);
                builder.add_rect(b, self.radius, &[], &styles);
                builder.add_text(
                    "+",
                    b.center_x(),
                    b.y + b.height / 2.0 - 14.0,
                    TextAnchor::Middle,
                    &[],
                    &self.text_style("text-light", 32.0, true),
                );
                builder.add_text(
                    "Add Member",
                    b.center_x(),
                    b.y + b.height / 2.0 + 22.0,
                    TextAnchor::Middle,
                    &[],
                    &self.text_style("text-light", 14.0, true),
                );
                builder.end_group();
            }
            CardKind::CircularReference { id } => {
                let name = self.display_name(id);
                self.placeholder(
                    &card.bounds,
                    "circular-reference",
                    ("cycle-background", "cycle-border"),
                    "Circular Reference Detected",
                    Some(format!("Cannot render {}", name)),
                    builder,
                );
            }
            CardKind::MaxDepth { .. } => {
                self.placeholder(
                    &card.bounds,
                    "max-depth",
                    ("depth-background", "depth-border"),
                    "Max depth reached",
                    None,
                    builder,
                );
            }
        }
    }

    fn display_name(&self, id: &str) -> String {
        self.hierarchy
            .person(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn tree_member(
        &self,
        person: &Person,
        b: &BoundingBox,
        level: usize,
        team_lead: bool,
        hovered: bool,
        builder: &mut SvgBuilder,
    ) {
        let unnamed_vacancy = person.is_unnamed_vacancy();
        let (fill, stroke) = if unnamed_vacancy {
            ("vacancy-background", "vacancy-border")
        } else if !person.is_active() {
            ("inactive-background", "inactive-border")
        } else {
            ("card-background", "card-border")
        };
        let (stroke, width) = if hovered {
            ("hover-border", 3.0)
        } else if person.is_active() {
            (stroke, 1.0)
        } else {
            (stroke, 2.0)
        };
        builder.add_rect(b, self.radius, &[], &self.fill_stroke(fill, stroke, width));

        let cx = b.center_x();
        let avatar = if level == 0 { "avatar-root" } else { "avatar" };
        builder.add_circle(
            cx,
            b.y + 52.0,
            36.0,
            &["avatar".to_string()],
            &self.fill_stroke(avatar, "text-light", 3.0),
        );
        builder.add_text(
            &person.initials(),
            cx,
            b.y + 52.0,
            TextAnchor::Middle,
            &["initials".to_string()],
            &self.text_style("text-light", 24.0, true),
        );
        builder.add_text(
            &person.name,
            cx,
            b.y + 108.0,
            TextAnchor::Middle,
            &["name".to_string()],
            &self.text_style("text-primary", 15.0, true),
        );
        builder.add_text(
            person.subtitle(),
            cx,
            b.y + 128.0,
            TextAnchor::Middle,
            &["subtitle".to_string()],
            &self.text_style("text-secondary", 13.0, false),
        );

        if !person.is_active() && !unnamed_vacancy {
            let end = person.end_date.as_deref().unwrap_or("Not set");
            builder.add_text(
                &format!("End: {}", end),
                cx,
                b.y + 150.0,
                TextAnchor::Middle,
                &["end-date".to_string()],
                &self.text_style("inactive-text", 13.0, false),
            );
        }

        if person.is_active() && team_lead {
            let badge = BoundingBox::new(cx - 45.0, b.y + 142.0, 90.0, 20.0);
            builder.add_rect(
                &badge,
                10.0,
                &["lead-badge".to_string()],
                &format!(r#" fill="{}""#, self.color("lead-badge")),
            );
            builder.add_text(
                "Team Lead",
                cx,
                badge.y + badge.height / 2.0,
                TextAnchor::Middle,
                &[],
                &self.text_style("text-light", 11.0, true),
            );
        }
    }

    fn stack_member(&self, person: &Person, b: &BoundingBox, level: usize, builder: &mut SvgBuilder) {
        let manages = !self.hierarchy.direct_reports(&person.id).is_empty();
        let accented = person.is_active() && (level == 0 || manages);

        let styles = if person.is_unnamed_vacancy() {
            self.fill_stroke("vacancy-background", "vacancy-border", 2.0)
        } else if !person.is_active() {
            self.fill_stroke("inactive-background", "inactive-border", 2.0)
        } else if level == 0 {
            format!(r#" fill="{}""#, self.color("stack-root"))
        } else if manages {
            format!(r#" fill="{}""#, self.color("stack-manager"))
        } else {
            self.fill_stroke("card-background", "card-border", 1.0)
        };
        builder.add_rect(b, self.radius, &[], &styles);

        let (name_token, subtitle_token) = if !person.is_active() {
            ("vacancy-border", "vacancy-border")
        } else if accented {
            ("text-light", "text-light")
        } else {
            ("text-primary", "text-secondary")
        };
        let x = b.x + 16.0;
        builder.add_text(
            &person.name,
            x,
            b.y + 26.0,
            TextAnchor::Start,
            &["name".to_string()],
            &self.text_style(name_token, 15.0, true),
        );
        builder.add_text(
            person.subtitle(),
            x,
            b.y + 48.0,
            TextAnchor::Start,
            &["subtitle".to_string()],
            &self.text_style(subtitle_token, 13.0, false),
        );
        if !person.is_active() {
            builder.add_text(
                "VACANT POSITION",
                x,
                b.y + 72.0,
                TextAnchor::Start,
                &[],
                &self.text_style("vacancy-border", 11.0, true),
            );
        }
    }

    fn placeholder(
        &self,
        b: &BoundingBox,
        class: &str,
        (fill, stroke): (&str, &str),
        title: &str,
        detail: Option<String>,
        builder: &mut SvgBuilder,
    ) {
        builder.start_group(None, &[class.to_string()]);
        builder.add_rect(b, self.radius, &[], &self.fill_stroke(fill, stroke, 2.0));
        let title_y = if detail.is_some() {
            b.y + b.height / 2.0 - 10.0
        } else {
            b.y + b.height / 2.0
        };
        builder.add_text(
            title,
            b.center_x(),
            title_y,
            TextAnchor::Middle,
            &[],
            &self.text_style("text-primary", 13.0, true),
        );
        if let Some(detail) = detail {
            builder.add_text(
                &detail,
                b.center_x(),
                b.y + b.height / 2.0 + 12.0,
                TextAnchor::Middle,
                &[],
                &self.text_style("text-secondary", 12.0, false),
            );
        }
        builder.end_group();
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
