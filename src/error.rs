//! Error types for loading snapshots and reporting data-integrity faults

use thiserror::Error;

/// Errors that can occur while loading a backend snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse snapshot JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Inconsistencies in the people/teams data.
///
/// These never abort a render: the hierarchy degrades around them and they
/// are reported through logging or inspected by callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityFault {
    #[error("manager '{manager}' of '{person}' does not exist")]
    DanglingManager { person: String, manager: String },

    #[error("vacancy '{vacancy}' reports to inactive '{manager}'")]
    InactiveVacancyManager { vacancy: String, manager: String },

    #[error("vacancy '{vacancy}' reports to another vacancy '{manager}'")]
    VacancyManagedByVacancy { vacancy: String, manager: String },

    #[error("lead '{lead}' of team '{team}' does not exist")]
    DanglingTeamLead { team: String, lead: String },

    #[error("member '{member}' of team '{team}' does not exist")]
    DanglingTeamMember { team: String, member: String },

    #[error("circular manager chain: {}", chain.join(" -> "))]
    ManagerCycle { chain: Vec<String> },
}
