//! JSON export of placed cards and connector segments

use serde::Serialize;

use crate::layout::{BoundingBox, ChartLayout, PlacedCard, Segment, ViewMode};

#[derive(Serialize)]
struct ChartDocument<'a> {
    mode: ViewMode,
    bounds: BoundingBox,
    cards: &'a [PlacedCard],
    segments: &'a [Segment],
}

/// Serialize a layout's cards and segments as pretty-printed JSON
pub fn render_json(layout: &ChartLayout) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ChartDocument {
        mode: layout.mode,
        bounds: layout.bounds,
        cards: layout.cards.cards(),
        segments: &layout.segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CardKind, Point, PositionSnapshot};

    #[test]
    fn test_json_shape() {
        let mut cards = PositionSnapshot::new();
        cards.insert(
            CardKind::AddSlot {
                parent: "1".to_string(),
                level: 0,
            },
            BoundingBox::new(0.0, 0.0, 220.0, 160.0),
        );
        let mut layout = ChartLayout::new(ViewMode::Tree, cards);
        layout.segments.push(Segment::dashed(Point::new(0.0, 0.0), Point::new(0.0, 30.0)));

        let value: serde_json::Value =
            serde_json::from_str(&render_json(&layout).unwrap()).unwrap();
        assert_eq!(value["mode"], "tree");
        assert_eq!(value["cards"][0]["kind"]["kind"], "add_slot");
        assert_eq!(value["cards"][0]["kind"]["parent"], "1");
        assert_eq!(value["segments"][0]["dashed"], true);
        assert_eq!(value["segments"][0]["to"]["y"], 30.0);
    }
}
