//! The parent -> children relation the chart is drawn from

use std::collections::HashSet;

use crate::model::{Person, Team};

use super::resolver::VisibleSet;

/// Display toggles that change which nodes and slots appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Show inactive people and vacancies; when off they are spliced out
    pub show_inactive: bool,
    /// Offer "add member" slots under managers
    pub show_add_slots: bool,
    /// Wrap reports into rows of a fixed size
    pub limit_per_row: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_inactive: true,
            show_add_slots: true,
            limit_per_row: true,
        }
    }
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_inactive(mut self, show: bool) -> Self {
        self.show_inactive = show;
        self
    }

    pub fn with_add_slots(mut self, show: bool) -> Self {
        self.show_add_slots = show;
        self
    }

    pub fn with_limit_per_row(mut self, limit: bool) -> Self {
        self.limit_per_row = limit;
        self
    }
}

/// A resolved visible set together with the options that shape it
#[derive(Debug, Clone)]
pub struct Hierarchy {
    visible: VisibleSet,
    options: ViewOptions,
}

impl Hierarchy {
    pub fn new(visible: VisibleSet, options: ViewOptions) -> Self {
        Self { visible, options }
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn options(&self) -> ViewOptions {
        self.options
    }

    /// The selected team when the view is team-filtered
    pub fn team(&self) -> Option<&Team> {
        self.visible.team.as_ref()
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.visible.get(id)
    }

    /// Root people in resolution order
    pub fn roots(&self) -> Vec<&Person> {
        self.visible
            .roots
            .iter()
            .filter_map(|id| self.visible.get(id))
            .collect()
    }

    pub fn is_team_lead(&self, id: &str) -> bool {
        self.team().is_some_and(|team| team.is_lead(id))
    }

    /// Visible people whose manager reference is `id`
    pub fn direct_reports(&self, id: &str) -> Vec<&Person> {
        self.visible
            .people
            .iter()
            .filter(|p| p.manager.as_deref() == Some(id))
            .collect()
    }

    /// Children of `parent` as drawn in the tree view.
    ///
    /// In a team view the lead owns every other visible team member and
    /// nobody else has children. In the full view children follow the
    /// manager relation; with inactive entries hidden each inactive child is
    /// replaced by its own direct reports.
    pub fn children_of(&self, parent: &str) -> Vec<&Person> {
        if let Some(team) = self.team() {
            if !team.is_lead(parent) {
                return vec![];
            }
            return self
                .visible
                .people
                .iter()
                .filter(|p| team.has_member(&p.id) && p.id != parent)
                .collect();
        }

        let reports = self.direct_reports(parent);
        if self.options.show_inactive {
            return reports;
        }

        let mut children = Vec::with_capacity(reports.len());
        let mut spliced = HashSet::new();
        self.splice_into(reports, &mut spliced, &mut children);
        children
    }

    /// Push active reports; replace inactive ones by their own reports.
    /// An inactive report of an inactive report is spliced again, each id at
    /// most once.
    ///
    /// This differs from a single-level splice, which would drop the whole
    /// subtree below an inactive grandchild: for `1 <- 2 <- 3 <- 4` with 2
    /// and 3 inactive, 4 is returned as a child of 1.
    fn splice_into<'h>(
        &'h self,
        reports: Vec<&'h Person>,
        spliced: &mut HashSet<&'h str>,
        children: &mut Vec<&'h Person>,
    ) {
        for report in reports {
            if report.is_active() {
                children.push(report);
            } else if spliced.insert(report.id.as_str()) {
                self.splice_into(self.direct_reports(&report.id), spliced, children);
            }
        }
    }
}
