//! Card placement for the tree view
//!
//! Placement runs in two passes over the render tree: `measure` sizes every
//! subtree bottom-up, `place` walks it top-down assigning absolute boxes. The
//! geometry follows a column-of-rows flow: a card sits centred above its
//! report rows, reports wrap into rows of `members_per_row`, and the add slot
//! joins the first row.

use tracing::debug;

use crate::hierarchy::{ChartNode, Hierarchy, TreeBuilder, ViewOptions};

use super::config::LayoutConfig;
use super::types::{BoundingBox, CardKind, ChartLayout, PositionSnapshot, ViewMode};

/// Build the render tree for `hierarchy` and place it
pub fn compute(hierarchy: &Hierarchy, config: &LayoutConfig, hovered: Option<&str>) -> ChartLayout {
    let nodes = TreeBuilder::new(hierarchy)
        .with_hovered(hovered)
        .with_max_depth(config.max_depth)
        .with_add_slot_exclusions(config.add_slot_exclusions.clone())
        .build();
    let cards = place_tree(&nodes, hierarchy.options(), config);
    debug!(roots = nodes.len(), cards = cards.len(), "tree placed");
    ChartLayout::new(ViewMode::Tree, cards)
}

/// Place render-tree roots side by side and publish their positions
pub fn place_tree(nodes: &[ChartNode], options: ViewOptions, config: &LayoutConfig) -> PositionSnapshot {
    let measured: Vec<Measured> = nodes.iter().map(|n| measure(n, options, config)).collect();

    let total_width = measured.iter().map(|m| m.width).sum::<f64>()
        + config.sibling_gap * measured.len().saturating_sub(1) as f64;
    let mut x = match config.viewport_width {
        Some(viewport) if viewport > total_width => (viewport - total_width) / 2.0,
        _ => 0.0,
    };

    let mut snapshot = PositionSnapshot::new();
    for root in &measured {
        place(root, x, 0.0, config, &mut snapshot);
        x += root.width + config.sibling_gap;
    }
    snapshot
}

/// A subtree with its size resolved
struct Measured<'a> {
    node: &'a ChartNode,
    width: f64,
    height: f64,
    rows: Vec<Row<'a>>,
}

struct Row<'a> {
    items: Vec<Item<'a>>,
    width: f64,
    /// Tallest item including its spacer
    height: f64,
}

enum Item<'a> {
    Node(Measured<'a>),
    AddSlot { parent: &'a str, level: usize },
}

impl Item<'_> {
    fn width(&self, config: &LayoutConfig) -> f64 {
        match self {
            Item::Node(m) => m.width,
            Item::AddSlot { .. } => config.add_slot_size.0,
        }
    }

    fn height(&self, config: &LayoutConfig) -> f64 {
        match self {
            Item::Node(m) => m.height,
            Item::AddSlot { .. } => config.add_slot_size.1,
        }
    }
}

fn measure<'a>(node: &'a ChartNode, options: ViewOptions, config: &LayoutConfig) -> Measured<'a> {
    let card = match node {
        ChartNode::Card(card) => card,
        ChartNode::CircularReference { .. } | ChartNode::MaxDepth { .. } => {
            return Measured {
                node,
                width: config.placeholder_size.0,
                height: config.placeholder_size.1,
                rows: vec![],
            };
        }
    };

    let per_row = if options.limit_per_row {
        config.members_per_row.max(1)
    } else {
        card.reports.len().max(1)
    };

    let mut item_rows: Vec<Vec<Item>> = card
        .reports
        .chunks(per_row)
        .map(|chunk| {
            chunk
                .iter()
                .map(|report| Item::Node(measure(report, options, config)))
                .collect()
        })
        .collect();

    if card.add_slot {
        if item_rows.is_empty() {
            item_rows.push(vec![]);
        }
        item_rows[0].push(Item::AddSlot {
            parent: &card.id,
            level: card.level,
        });
    }

    let rows: Vec<Row> = item_rows
        .into_iter()
        .map(|items| {
            let width = items.iter().map(|i| i.width(config)).sum::<f64>()
                + config.sibling_gap * items.len().saturating_sub(1) as f64;
            let height = items
                .iter()
                .map(|i| config.report_spacer + i.height(config))
                .fold(0.0, f64::max);
            Row {
                items,
                width,
                height,
            }
        })
        .collect();

    let (card_width, card_height) = config.card_size;
    let width = rows.iter().map(|r| r.width).fold(card_width, f64::max);
    let block_height = if rows.is_empty() {
        0.0
    } else {
        config.report_spacer
            + rows.iter().map(|r| r.height).sum::<f64>()
            + config.row_gap * (rows.len() - 1) as f64
    };

    Measured {
        node,
        width,
        height: card_height + block_height,
        rows,
    }
}

fn place(measured: &Measured, left: f64, top: f64, config: &LayoutConfig, snapshot: &mut PositionSnapshot) {
    let (kind, (width, height)) = match measured.node {
        ChartNode::Card(card) => (
            CardKind::Member {
                id: card.id.clone(),
                level: card.level,
                team_lead: card.team_lead,
                hovered: card.hovered,
            },
            config.card_size,
        ),
        ChartNode::CircularReference { id, .. } => (
            CardKind::CircularReference { id: id.clone() },
            config.placeholder_size,
        ),
        ChartNode::MaxDepth { id, .. } => {
            (CardKind::MaxDepth { id: id.clone() }, config.placeholder_size)
        }
    };
    let card_box = BoundingBox::new(left + (measured.width - width) / 2.0, top, width, height);
    snapshot.insert(kind, card_box);

    let mut row_top = card_box.bottom() + config.report_spacer;
    for row in &measured.rows {
        let mut x = left + (measured.width - row.width) / 2.0;
        let item_top = row_top + config.report_spacer;
        for item in &row.items {
            match item {
                Item::Node(child) => place(child, x, item_top, config, snapshot),
                Item::AddSlot { parent, level } => {
                    let (w, h) = config.add_slot_size;
                    snapshot.insert(
                        CardKind::AddSlot {
                            parent: parent.to_string(),
                            level: *level,
                        },
                        BoundingBox::new(x, item_top, w, h),
                    );
                }
            }
            x += item.width(config) + config.sibling_gap;
        }
        row_top += row.height + config.row_gap;
    }
}
