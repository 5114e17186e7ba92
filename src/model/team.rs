//! Teams and their synthetic lead hierarchy

use serde::Serialize;

/// A team: an unordered set of member ids plus an optional lead
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
    pub lead: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            members: vec![],
            lead: None,
        }
    }

    pub fn with_lead(mut self, lead: impl Into<String>) -> Self {
        self.lead = Some(lead.into());
        self
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_member(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }

    pub fn is_lead(&self, id: &str) -> bool {
        self.lead.as_deref() == Some(id)
    }
}
