//! Closed status vocabularies shared by plannings, assignments and members.
//!
//! Every variant maps to its storage string, its display label and its badge
//! tone through exhaustive matches, so adding a status is a compile-time change.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Lifecycle of a planning (and of an individual assignment).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

/// Color family used to render a status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Blue,
    Yellow,
    Green,
    Red,
}

impl PlanningStatus {
    pub const ALL: [PlanningStatus; 4] = [
        Self::Planned,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the canonical string used by the record store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planifié",
            Self::InProgress => "En cours",
            Self::Completed => "Terminé",
            Self::Cancelled => "Annulé",
        }
    }

    pub fn tone(self) -> StatusTone {
        match self {
            Self::Planned => StatusTone::Blue,
            Self::InProgress => StatusTone::Yellow,
            Self::Completed => StatusTone::Green,
            Self::Cancelled => StatusTone::Red,
        }
    }
}

impl TryFrom<&str> for PlanningStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "planned" => Ok(Self::Planned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidStatus(format!(
                "invalid planning status: {other}"
            ))),
        }
    }
}

impl fmt::Display for PlanningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Membership status. Removing a member only deactivates it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl TryFrom<&str> for MemberStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(EngineError::InvalidStatus(format!(
                "invalid member status: {other}"
            ))),
        }
    }
}
