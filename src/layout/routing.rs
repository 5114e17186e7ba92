//! Connector routing between rendered parent cards and their children
//!
//! Routing reads a frozen [`PositionSnapshot`] and never touches the
//! renderer: the same snapshot and relation always produce the same
//! segments.

use tracing::debug;

use crate::hierarchy::Hierarchy;

use super::config::LayoutConfig;
use super::types::{BoundingBox, CardKind, ChartLayout, Point, PositionSnapshot, Segment, ViewMode};

/// Replace `layout.segments` with the connectors for the current snapshot.
///
/// Stack layouts carry no connectors and are left with an empty list.
pub fn route_connectors(layout: &mut ChartLayout, hierarchy: &Hierarchy, config: &LayoutConfig) {
    layout.segments = match layout.mode {
        ViewMode::Tree => segments_for(&layout.cards, hierarchy, config),
        ViewMode::Stack => vec![],
    };
    layout.compute_bounds();
    debug!(segments = layout.segments.len(), "connectors routed");
}

/// Connector segments for every rendered parent in `cards`
pub fn segments_for(
    cards: &PositionSnapshot,
    hierarchy: &Hierarchy,
    config: &LayoutConfig,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    for placed in cards.cards() {
        let CardKind::Member { id, .. } = &placed.kind else {
            continue;
        };

        // Children not in the snapshot were not rendered; skip them this pass
        let children: Vec<BoundingBox> = hierarchy
            .children_of(id)
            .iter()
            .filter_map(|child| cards.child(&child.id))
            .collect();
        let slots = cards.add_slots_of(id);

        segments.extend(parent_segments(
            &placed.bounds,
            &children,
            &slots,
            config.trunk_offset,
        ));
    }
    segments
}

/// Segments joining one parent to its children and add slots.
///
/// A single target gets a trunk and one drop. Several targets share a
/// horizontal span at trunk level; the part reaching add slots is dashed.
pub fn parent_segments(
    parent: &BoundingBox,
    children: &[BoundingBox],
    slots: &[BoundingBox],
    trunk_offset: f64,
) -> Vec<Segment> {
    let target_count = children.len() + slots.len();
    if target_count == 0 {
        return vec![];
    }

    let top = parent.bottom_center();
    let trunk_y = top.y + trunk_offset;
    let trunk = Point::new(top.x, trunk_y);
    let mut segments = vec![Segment::solid(top, trunk)];

    let drop_to = |target: &BoundingBox| (Point::new(target.center_x(), trunk_y), target.top_center());

    if target_count == 1 {
        let (target, dashed) = match children.first() {
            Some(child) => (child, false),
            None => (&slots[0], true),
        };
        let end = target.top_center();
        segments.push(if dashed {
            Segment::dashed(trunk, end)
        } else {
            Segment::solid(trunk, end)
        });
        return segments;
    }

    let span = |boxes: &[BoundingBox]| {
        boxes.iter().map(BoundingBox::center_x).fold(None, |acc: Option<(f64, f64)>, x| {
            Some(match acc {
                Some((lo, hi)) => (lo.min(x), hi.max(x)),
                None => (x, x),
            })
        })
    };

    let regular = span(children);
    if let Some((left, right)) = regular {
        segments.push(Segment::solid(
            Point::new(left, trunk_y),
            Point::new(right, trunk_y),
        ));
    }
    if let Some((slot_left, slot_right)) = span(slots) {
        let from = match regular {
            Some((_, right)) => right,
            None => slot_left,
        };
        segments.push(Segment::dashed(
            Point::new(from, trunk_y),
            Point::new(slot_right, trunk_y),
        ));
    }

    for child in children {
        let (from, to) = drop_to(child);
        segments.push(Segment::solid(from, to));
    }
    for slot in slots {
        let (from, to) = drop_to(slot);
        segments.push(Segment::dashed(from, to));
    }
    segments
}
