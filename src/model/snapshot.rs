//! Read-only snapshot of the backend's people and teams
//!
//! The backend serves users, draft positions and teams as JSON. Identifiers
//! arrive either as numbers or strings and are normalised to strings here so
//! the rest of the crate only ever compares `&str`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{IntegrityFault, SnapshotError};
use crate::hierarchy::guard::{self, ChainEnd, Link};

use super::person::{Person, Status, VACANCY_PREFIX};
use super::team::Team;

/// Role given to vacancies synthesized from draft positions
pub const VACANCY_ROLE: &str = "Position Open";

/// A user account as returned by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub line_manager: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// An open (draft) position
#[derive(Debug, Clone, Deserialize)]
pub struct DraftRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub position_title: String,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub line_manager: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
}

/// A team with its member ids already fetched
#[derive(Debug, Clone, Deserialize)]
pub struct TeamRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub lead_id: Option<String>,
    #[serde(default, deserialize_with = "id_list")]
    pub members: Vec<String>,
}

impl From<&UserRecord> for Person {
    fn from(user: &UserRecord) -> Self {
        let status = match user.status.as_deref() {
            Some("inactive") => Status::Inactive,
            _ => Status::Active,
        };
        Person {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            status,
            manager: user.line_manager.clone(),
            position: user.position.clone(),
            start_date: user.start_date.clone(),
            end_date: user.end_date.clone(),
        }
    }
}

impl From<&DraftRecord> for Person {
    fn from(draft: &DraftRecord) -> Self {
        let id = format!("{}{}", VACANCY_PREFIX, draft.id);
        Person {
            email: format!("{}@vacancy.temp", id),
            id,
            name: draft.position_title.clone(),
            role: VACANCY_ROLE.to_string(),
            status: Status::Inactive,
            manager: draft.line_manager.clone(),
            position: Some(draft.position_title.clone()),
            start_date: draft.start_date.clone(),
            end_date: None,
        }
    }
}

impl From<&TeamRecord> for Team {
    fn from(team: &TeamRecord) -> Self {
        Team {
            id: team.id.clone(),
            name: team.name.clone(),
            description: team.description.clone().unwrap_or_default(),
            members: team.members.clone(),
            lead: team.lead_id.clone(),
        }
    }
}

/// Everything one render cycle needs from the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub drafts: Vec<DraftRecord>,
    #[serde(default)]
    pub teams: Vec<TeamRecord>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json(content: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Users followed by vacancies, in backend order
    pub fn people(&self) -> Vec<Person> {
        self.users
            .iter()
            .map(Person::from)
            .chain(self.drafts.iter().map(Person::from))
            .collect()
    }

    pub fn teams(&self) -> Vec<Team> {
        self.teams.iter().map(Team::from).collect()
    }

    /// Inspect the snapshot for dangling references, bad vacancy managers
    /// and manager cycles.
    pub fn integrity_faults(&self) -> Vec<IntegrityFault> {
        integrity_faults(&self.people(), &self.teams())
    }
}

/// Collect data-integrity faults over people and teams
pub fn integrity_faults(people: &[Person], teams: &[Team]) -> Vec<IntegrityFault> {
    let by_id: HashMap<&str, &Person> = people.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut faults = Vec::new();

    for person in people {
        let Some(manager_id) = person.manager.as_deref() else {
            continue;
        };
        match by_id.get(manager_id) {
            None => faults.push(IntegrityFault::DanglingManager {
                person: person.id.clone(),
                manager: manager_id.to_string(),
            }),
            Some(manager) if person.is_vacancy() && manager.is_vacancy() => {
                faults.push(IntegrityFault::VacancyManagedByVacancy {
                    vacancy: person.id.clone(),
                    manager: manager.id.clone(),
                })
            }
            Some(manager) if person.is_vacancy() && !manager.is_active() => {
                faults.push(IntegrityFault::InactiveVacancyManager {
                    vacancy: person.id.clone(),
                    manager: manager.id.clone(),
                })
            }
            Some(_) => {}
        }
    }

    // Report each cycle once, from its smallest member
    let mut seen_cycles: HashSet<String> = HashSet::new();
    for person in people {
        let chain = guard::climb(&person.id, guard::MAX_CHAIN_HOPS, |id| {
            match by_id.get(id).and_then(|p| p.manager.as_deref()) {
                None => Link::End,
                Some(m) if by_id.contains_key(m) => Link::To(m.to_string()),
                Some(m) => Link::Dangling(m.to_string()),
            }
        });
        if let ChainEnd::Cycle { repeated } = &chain.end {
            if repeated != &person.id {
                continue;
            }
            let smallest = chain
                .ancestors
                .iter()
                .chain(std::iter::once(&person.id))
                .min()
                .cloned()
                .unwrap_or_default();
            if smallest == person.id && seen_cycles.insert(smallest) {
                let mut cycle = vec![person.id.clone()];
                cycle.extend(chain.ancestors.iter().cloned());
                cycle.push(person.id.clone());
                faults.push(IntegrityFault::ManagerCycle { chain: cycle });
            }
        }
    }

    for team in teams {
        if let Some(lead) = team.lead.as_deref() {
            if !by_id.contains_key(lead) {
                faults.push(IntegrityFault::DanglingTeamLead {
                    team: team.id.clone(),
                    lead: lead.to_string(),
                });
            }
        }
        for member in &team.members {
            if !by_id.contains_key(member.as_str()) {
                faults.push(IntegrityFault::DanglingTeamMember {
                    team: team.id.clone(),
                    member: member.clone(),
                });
            }
        }
    }

    faults
}

/// Identifier as sent by the backend: integer primary key or string
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Str(String),
}

impl RawId {
    fn into_string(self) -> Option<String> {
        match self {
            RawId::Int(n) => Some(n.to_string()),
            RawId::Str(s) if s.trim().is_empty() => None,
            RawId::Str(s) => Some(s),
        }
    }
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?
        .into_string()
        .ok_or_else(|| serde::de::Error::custom("identifier must not be empty"))
}

fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.and_then(RawId::into_string))
}

fn id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Vec::<RawId>::deserialize(deserializer)?
        .into_iter()
        .filter_map(RawId::into_string)
        .collect())
}
