//! Core types for the layout engine

use std::collections::HashMap;

use serde::Serialize;

/// A 2D point in the chart coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box representing the on-screen extent of a card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Center point of the top edge
    pub fn top_center(&self) -> Point {
        Point::new(self.center_x(), self.y)
    }

    /// Center point of the bottom edge
    pub fn bottom_center(&self) -> Point {
        Point::new(self.center_x(), self.bottom())
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Expand this bounding box to include a point
    pub fn expand_to_include(&self, point: Point) -> BoundingBox {
        let x = self.x.min(point.x);
        let y = self.y.min(point.y);
        let right = self.right().max(point.x);
        let bottom = self.bottom().max(point.y);
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// What a placed card represents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardKind {
    Member {
        id: String,
        level: usize,
        team_lead: bool,
        hovered: bool,
    },
    /// "Add member" affordance under `parent`
    AddSlot { parent: String, level: usize },
    CircularReference { id: String },
    MaxDepth { id: String },
}

impl CardKind {
    pub fn member_id(&self) -> Option<&str> {
        match self {
            CardKind::Member { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// A card with its on-screen position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedCard {
    pub kind: CardKind,
    pub bounds: BoundingBox,
}

/// Frozen card positions published once per paint.
///
/// Cards keep render order; member cards are indexed by person id and add
/// slots by the id of the person they add under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionSnapshot {
    cards: Vec<PlacedCard>,
    members: HashMap<String, usize>,
    placeholders: HashMap<String, usize>,
    add_slots: HashMap<String, Vec<usize>>,
}

impl PositionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a card; a later member card with the same id replaces the index
    pub fn insert(&mut self, kind: CardKind, bounds: BoundingBox) {
        let index = self.cards.len();
        match &kind {
            CardKind::Member { id, .. } => {
                self.members.insert(id.clone(), index);
            }
            CardKind::AddSlot { parent, .. } => {
                self.add_slots.entry(parent.clone()).or_default().push(index);
            }
            CardKind::CircularReference { id } | CardKind::MaxDepth { id } => {
                self.placeholders.insert(id.clone(), index);
            }
        }
        self.cards.push(PlacedCard { kind, bounds });
    }

    /// All cards in render order
    pub fn cards(&self) -> &[PlacedCard] {
        &self.cards
    }

    /// Position of a member's card, if it was rendered
    pub fn member(&self, id: &str) -> Option<BoundingBox> {
        self.members.get(id).map(|&i| self.cards[i].bounds)
    }

    /// Where a child of some parent was drawn: its placeholder if the guard
    /// stopped there, otherwise its card
    pub fn child(&self, id: &str) -> Option<BoundingBox> {
        self.placeholders
            .get(id)
            .or_else(|| self.members.get(id))
            .map(|&i| self.cards[i].bounds)
    }

    /// Positions of the add slots rendered under `parent`
    pub fn add_slots_of(&self, parent: &str) -> Vec<BoundingBox> {
        self.add_slots
            .get(parent)
            .map(|indices| indices.iter().map(|&i| self.cards[i].bounds).collect())
            .unwrap_or_default()
    }

    /// Member ids in render order
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().filter_map(|c| c.kind.member_id())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Bounding box of every card
    pub fn bounds(&self) -> BoundingBox {
        let mut cards = self.cards.iter();
        let Some(first) = cards.next() else {
            return BoundingBox::zero();
        };
        cards.fold(first.bounds, |acc, card| acc.union(&card.bounds))
    }
}

/// A straight connector line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    /// Drawn dashed (leads to an add slot)
    pub dashed: bool,
}

impl Segment {
    pub fn solid(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            dashed: false,
        }
    }

    pub fn dashed(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            dashed: true,
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.from.x == self.to.x
    }
}

/// Rendering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Top-down tree with connector lines
    #[default]
    Tree,
    /// Indented rows, no connectors
    Stack,
}

/// The complete result of layout computation
#[derive(Debug, Clone, Default)]
pub struct ChartLayout {
    pub mode: ViewMode,
    /// Placed cards
    pub cards: PositionSnapshot,
    /// Connector lines (tree mode only)
    pub segments: Vec<Segment>,
    /// Bounding box containing all cards and segments
    pub bounds: BoundingBox,
}

impl ChartLayout {
    pub fn new(mode: ViewMode, cards: PositionSnapshot) -> Self {
        let mut layout = Self {
            mode,
            cards,
            segments: vec![],
            bounds: BoundingBox::zero(),
        };
        layout.compute_bounds();
        layout
    }

    /// Recompute the bounding box over cards and connector endpoints
    pub fn compute_bounds(&mut self) {
        let mut bounds = self.cards.bounds();
        for segment in &self.segments {
            bounds = bounds.expand_to_include(segment.from);
            bounds = bounds.expand_to_include(segment.to);
        }
        self.bounds = bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bb.right(), 110.0);
        assert_eq!(bb.bottom(), 70.0);
        assert_eq!(bb.center_x(), 60.0);
        assert_eq!(bb.top_center(), Point::new(60.0, 20.0));
        assert_eq!(bb.bottom_center(), Point::new(60.0, 70.0));
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        let b = BoundingBox::new(100.0, 100.0, 50.0, 50.0);
        let union = a.union(&b);

        assert_eq!(union.x, 0.0);
        assert_eq!(union.y, 0.0);
        assert_eq!(union.width, 150.0);
        assert_eq!(union.height, 150.0);
    }

    #[test]
    fn test_snapshot_indexes() {
        let mut snapshot = PositionSnapshot::new();
        snapshot.insert(
            CardKind::Member {
                id: "1".to_string(),
                level: 0,
                team_lead: false,
                hovered: false,
            },
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        );
        snapshot.insert(
            CardKind::AddSlot {
                parent: "1".to_string(),
                level: 0,
            },
            BoundingBox::new(20.0, 40.0, 10.0, 10.0),
        );
        snapshot.insert(
            CardKind::CircularReference { id: "1".to_string() },
            BoundingBox::new(40.0, 40.0, 10.0, 10.0),
        );

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.member("1"), Some(BoundingBox::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(snapshot.member("2"), None);
        assert_eq!(snapshot.child("1"), Some(BoundingBox::new(40.0, 40.0, 10.0, 10.0)));
        assert_eq!(snapshot.add_slots_of("1").len(), 1);
        assert!(snapshot.add_slots_of("2").is_empty());
        assert_eq!(snapshot.member_ids().collect::<Vec<_>>(), vec!["1"]);
        assert_eq!(snapshot.bounds(), BoundingBox::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_empty_snapshot_bounds() {
        assert_eq!(PositionSnapshot::new().bounds(), BoundingBox::zero());
    }
}
