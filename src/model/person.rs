//! People shown on the chart

use serde::{Deserialize, Serialize};

/// Prefix that marks a vacancy identifier (an open draft position).
pub const VACANCY_PREFIX: &str = "draft-";

/// Lifecycle status of a person record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

/// A person (or open position) in the organization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: Status,
    /// Weak back-reference to the manager's identifier
    pub manager: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Person {
    /// Create an active person with no manager
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            role: String::new(),
            status: Status::Active,
            manager: None,
            position: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Set the manager reference
    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    /// Set the lifecycle status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the role/title
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// A hierarchy root has no manager reference
    pub fn is_root(&self) -> bool {
        self.manager.is_none()
    }

    /// Open position synthesized from a draft headcount entry
    pub fn is_vacancy(&self) -> bool {
        self.id.starts_with(VACANCY_PREFIX)
    }

    /// Inactive entry that still carries a placeholder name
    pub fn is_unnamed_vacancy(&self) -> bool {
        !self.is_active() && (self.name == "Vacancy" || self.name.contains("Position Open"))
    }

    /// Position if known, otherwise role
    pub fn subtitle(&self) -> &str {
        match self.position.as_deref() {
            Some(position) if !position.is_empty() => position,
            _ => &self.role,
        }
    }

    /// Uppercase initials of each word in the name
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}
