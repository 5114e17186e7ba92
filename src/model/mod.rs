//! Domain records: people, teams, and the backend snapshot they come from

pub mod person;
pub mod snapshot;
pub mod team;

pub use person::{Person, Status, VACANCY_PREFIX};
pub use snapshot::{integrity_faults, DraftRecord, Snapshot, TeamRecord, UserRecord, VACANCY_ROLE};
pub use team::Team;
