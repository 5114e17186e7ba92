//! Visible-set and root resolution for a team filter

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::{error, warn};

use crate::model::{Person, Team};

use super::guard::{self, Chain, ChainEnd, Link};

/// Which slice of the organization to show
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// The full organization
    #[default]
    All,
    /// One team, identified by id
    Team(String),
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" => Filter::All,
            team => Filter::Team(team.to_string()),
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Team(id) => f.write_str(id),
        }
    }
}

/// The people a filter renders and the roots to start from
#[derive(Debug, Clone, Default)]
pub struct VisibleSet {
    /// Visible people in input order
    pub people: Vec<Person>,
    /// Top-level ids, in input order
    pub roots: Vec<String>,
    /// The selected team, when a known team filter is active
    pub team: Option<Team>,
    /// Manager chains that stopped on a fault while climbing
    pub truncated: Vec<Chain>,
}

impl VisibleSet {
    pub fn contains(&self, id: &str) -> bool {
        self.people.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.people.iter().map(|p| p.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

/// Compute the people and roots a filter shows.
///
/// For a team filter the lead and every member are included together with
/// their whole manager chain, so the path to the top stays visible. Missing
/// people, dangling managers and cycles only shorten a chain.
pub fn resolve_visible_set(people: &[Person], teams: &[Team], filter: &Filter) -> VisibleSet {
    let team = match filter {
        Filter::All => None,
        Filter::Team(id) => {
            let found = teams.iter().find(|t| &t.id == id);
            if found.is_none() {
                warn!(team = %id, "selected team not found, showing full organization");
            }
            found
        }
    };

    let Some(team) = team else {
        return VisibleSet {
            people: people.to_vec(),
            roots: people
                .iter()
                .filter(|p| p.is_root())
                .map(|p| p.id.clone())
                .collect(),
            team: None,
            truncated: vec![],
        };
    };

    let by_id: HashMap<&str, &Person> = people.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut included: HashSet<String> = HashSet::new();
    let mut truncated = Vec::new();

    let starts = team
        .lead
        .iter()
        .map(|lead| (lead, "team lead"))
        .chain(team.members.iter().map(|m| (m, "team member")));

    for (id, kind) in starts {
        included.insert(id.clone());

        if !by_id.contains_key(id.as_str()) {
            warn!(id = %id, kind, team = %team.id, "not found in people list");
            continue;
        }

        let chain = manager_chain(&by_id, id);
        match &chain.end {
            ChainEnd::Root => {}
            ChainEnd::Dangling { missing } => {
                warn!(id = %id, manager = %missing, "line manager not found, chain truncated");
            }
            ChainEnd::Cycle { repeated } => {
                error!(id = %id, repeated = %repeated, "circular manager reference detected");
            }
            ChainEnd::HopLimit => {
                error!(id = %id, hops = guard::MAX_CHAIN_HOPS, "max chain length reached");
            }
        }
        included.extend(chain.ancestors.iter().cloned());
        if !chain.is_complete() {
            truncated.push(chain);
        }
    }

    let visible: Vec<Person> = people
        .iter()
        .filter(|p| included.contains(&p.id))
        .cloned()
        .collect();

    let roots = match team.lead.as_deref() {
        Some(lead) if visible.iter().any(|p| p.id == lead) => vec![lead.to_string()],
        _ => visible
            .iter()
            .filter(|p| p.is_root())
            .map(|p| p.id.clone())
            .collect(),
    };

    VisibleSet {
        people: visible,
        roots,
        team: Some(team.clone()),
        truncated,
    }
}

/// Climb the manager chain of `start` over an id index
pub fn manager_chain(by_id: &HashMap<&str, &Person>, start: &str) -> Chain {
    guard::climb(start, guard::MAX_CHAIN_HOPS, |id| {
        match by_id.get(id).and_then(|p| p.manager.as_deref()) {
            None => Link::End,
            Some(manager) if by_id.contains_key(manager) => Link::To(manager.to_string()),
            Some(manager) => Link::Dangling(manager.to_string()),
        }
    })
}
