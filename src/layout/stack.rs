//! Card placement for the stack view
//!
//! Each manager gets one or more rows: the first row holds the manager's card
//! followed by the first chunk of direct reports, later rows hold further
//! chunks shifted right by the continuation indent. Reports that manage
//! people get their own rows below, one level further in.

use tracing::{debug, error};

use crate::hierarchy::{AncestorPath, Descent, Hierarchy};
use crate::model::Person;

use super::config::LayoutConfig;
use super::types::{BoundingBox, CardKind, ChartLayout, PositionSnapshot, ViewMode};

/// Place every root's rows top to bottom
pub fn compute(hierarchy: &Hierarchy, config: &LayoutConfig, hovered: Option<&str>) -> ChartLayout {
    let mut placer = StackPlacer {
        hierarchy,
        config,
        hovered,
        snapshot: PositionSnapshot::new(),
        y: 0.0,
    };
    for root in hierarchy.roots() {
        if placer.shown(root) {
            placer.member(root, &AncestorPath::new());
        }
    }
    debug!(cards = placer.snapshot.len(), "stack placed");
    ChartLayout::new(ViewMode::Stack, placer.snapshot)
}

struct StackPlacer<'a> {
    hierarchy: &'a Hierarchy,
    config: &'a LayoutConfig,
    hovered: Option<&'a str>,
    snapshot: PositionSnapshot,
    /// Top of the next row
    y: f64,
}

impl<'a> StackPlacer<'a> {
    fn shown(&self, person: &Person) -> bool {
        self.hierarchy.options().show_inactive || person.is_active()
    }

    /// Direct reports under the global manager relation, without splicing
    fn reports(&self, id: &str) -> Vec<&'a Person> {
        self.hierarchy
            .direct_reports(id)
            .into_iter()
            .filter(|p| self.shown(p))
            .collect()
    }

    fn member(&mut self, person: &'a Person, path: &AncestorPath) {
        let level = path.depth();
        let indent = level as f64 * self.config.stack_level_indent;

        match path.check(&person.id, self.config.max_depth) {
            Descent::Cycle => {
                error!(id = %person.id, name = %person.name, "circular reference detected");
                self.placeholder(CardKind::CircularReference { id: person.id.clone() }, indent);
                return;
            }
            Descent::TooDeep => {
                error!(id = %person.id, name = %person.name, "max depth reached");
                self.placeholder(CardKind::MaxDepth { id: person.id.clone() }, indent);
                return;
            }
            Descent::Enter => {}
        }

        let reports = self.reports(&person.id);
        let per_row = if self.hierarchy.options().limit_per_row {
            self.config.members_per_row.max(1)
        } else {
            reports.len().max(1)
        };

        let (width, height) = self.config.stack_card_size;
        let step = width + self.config.stack_gap;

        let mut chunks: Vec<&[&Person]> = reports.chunks(per_row).collect();
        if chunks.is_empty() {
            chunks.push(&[]);
        }

        for (index, chunk) in chunks.into_iter().enumerate() {
            let mut x = indent;
            if index == 0 {
                let kind = self.card(person, level);
                self.snapshot.insert(kind, BoundingBox::new(x, self.y, width, height));
                x += step;
            } else {
                x += self.config.stack_continuation_indent;
            }
            for report in chunk {
                let kind = self.card(report, level + 1);
                self.snapshot.insert(kind, BoundingBox::new(x, self.y, width, height));
                x += step;
            }
            self.y += height + self.config.stack_row_gap;
        }

        let below = path.with(&person.id);
        for report in reports {
            if !self.reports(&report.id).is_empty() {
                self.member(report, &below);
            }
        }
    }

    fn card(&self, person: &Person, level: usize) -> CardKind {
        CardKind::Member {
            id: person.id.clone(),
            level,
            team_lead: self.hierarchy.is_team_lead(&person.id),
            hovered: self.hovered == Some(person.id.as_str()),
        }
    }

    fn placeholder(&mut self, kind: CardKind, indent: f64) {
        let (width, height) = self.config.stack_card_size;
        self.snapshot.insert(kind, BoundingBox::new(indent, self.y, width, height));
        self.y += height + self.config.stack_row_gap;
    }
}
