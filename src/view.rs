//! Stateful chart front
//!
//! `ChartView` owns the last loaded snapshot and the UI state (filter,
//! toggles, hover, viewport width). Any change marks the cached layout stale;
//! the next [`ChartView::layout`] call places cards and routes connectors in
//! one synchronous pass.

use tracing::debug;

use crate::hierarchy::{resolve_visible_set, Filter, Hierarchy, ViewOptions};
use crate::layout::{layout_chart, ChartLayout, LayoutConfig, ViewMode};
use crate::model::{Person, Snapshot, Team};

#[derive(Debug, Clone)]
pub struct ChartView {
    people: Vec<Person>,
    teams: Vec<Team>,
    filter: Filter,
    options: ViewOptions,
    mode: ViewMode,
    hovered: Option<String>,
    config: LayoutConfig,
    hierarchy: Hierarchy,
    cached: Option<ChartLayout>,
}

impl ChartView {
    pub fn new(people: Vec<Person>, teams: Vec<Team>) -> Self {
        let filter = Filter::All;
        let options = ViewOptions::default();
        let hierarchy = Hierarchy::new(resolve_visible_set(&people, &teams, &filter), options);
        Self {
            people,
            teams,
            filter,
            options,
            mode: ViewMode::default(),
            hovered: None,
            config: LayoutConfig::default(),
            hierarchy,
            cached: None,
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(snapshot.people(), snapshot.teams())
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self.cached = None;
        self
    }

    /// Replace the data with a fresh snapshot, keeping UI state
    pub fn reload(&mut self, snapshot: &Snapshot) {
        self.people = snapshot.people();
        self.teams = snapshot.teams();
        self.resolve();
    }

    /// Switch between the whole organisation and one team
    pub fn select(&mut self, filter: Filter) {
        if self.filter != filter {
            self.filter = filter;
            self.resolve();
        }
    }

    pub fn set_options(&mut self, options: ViewOptions) {
        if self.options != options {
            self.options = options;
            self.resolve();
        }
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            self.mode = mode;
            self.cached = None;
        }
    }

    pub fn hover(&mut self, id: Option<&str>) {
        if self.hovered.as_deref() != id {
            self.hovered = id.map(str::to_string);
            self.cached = None;
        }
    }

    /// Container width changed
    pub fn resize(&mut self, width: Option<f64>) {
        if self.config.viewport_width != width {
            self.config.viewport_width = width;
            self.cached = None;
        }
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn options(&self) -> ViewOptions {
        self.options
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// True when the next `layout` call recomputes
    pub fn is_stale(&self) -> bool {
        self.cached.is_none()
    }

    /// Current layout, recomputed if anything changed since the last call
    pub fn layout(&mut self) -> &ChartLayout {
        let hierarchy = &self.hierarchy;
        let (mode, config, hovered) = (self.mode, &self.config, self.hovered.as_deref());
        self.cached.get_or_insert_with(|| {
            debug!(?mode, "recomputing chart layout");
            layout_chart(hierarchy, mode, config, hovered)
        })
    }

    fn resolve(&mut self) {
        let visible = resolve_visible_set(&self.people, &self.teams, &self.filter);
        self.hierarchy = Hierarchy::new(visible, self.options);
        self.cached = None;
    }
}
