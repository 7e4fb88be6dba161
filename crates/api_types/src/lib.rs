use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a planning as exchanged over HTTP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl PlanningStatus {
    /// Returns the canonical status string used by the engine/database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

pub mod service {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ServiceNew {
        /// Unique technical name.
        pub name: String,
        pub display_name: String,
        pub emoji: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ServiceUpdate {
        pub display_name: String,
        pub emoji: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ServiceActive {
        pub is_active: bool,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ServiceList {
        /// Only active services when `true`.
        pub active_only: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ServiceView {
        pub id: Uuid,
        pub name: String,
        pub display_name: String,
        pub emoji: Option<String>,
        pub description: Option<String>,
        pub is_active: bool,
    }
}

pub mod profile {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileNew {
        pub full_name: Option<String>,
        pub email: Option<String>,
        /// Defaults to `member`.
        pub role: Option<String>,
    }

    /// Accent- and case-insensitive search over name and email.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ProfileSearch {
        pub q: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileView {
        pub id: Uuid,
        pub full_name: Option<String>,
        pub email: Option<String>,
        pub role: String,
        pub display_name: String,
    }
}

pub mod member {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberNew {
        /// Profile id of the person to add.
        pub user_id: Uuid,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub display_name: String,
        pub joined_at: DateTime<Utc>,
        pub notes: Option<String>,
        pub added_by: Option<String>,
    }
}

pub mod planning {
    use super::*;

    /// Where a quick edit applies.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(tag = "kind", rename_all = "snake_case")]
    pub enum QuickEditTarget {
        /// A cell of the weekly view: membership id and date.
        Cell { date: NaiveDate, member_id: Uuid },
        /// An existing planning; the cell is resolved from its first assignee.
        Planning { planning_id: Uuid },
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct QuickEdit {
        pub target: QuickEditTarget,
        pub task: String,
        pub status: Option<PlanningStatus>,
        pub notes: Option<String>,
        /// Week of the returned board; the edited date when absent.
        pub anchor: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssigneeView {
        pub person_id: Uuid,
        pub display_name: String,
        /// `false` when the profile could not be loaded.
        pub resolved: bool,
        pub individual_status: PlanningStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PlanningView {
        pub id: Uuid,
        pub date: NaiveDate,
        pub task: String,
        pub status: PlanningStatus,
        pub status_label: String,
        pub notes: Option<String>,
        pub created_by: Option<String>,
        pub updated_at: DateTime<Utc>,
        pub assignees: Vec<AssigneeView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DateGroupView {
        pub date: NaiveDate,
        pub plannings: Vec<PlanningView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PlanningSaved {
        pub planning: PlanningView,
        pub board: super::board::BoardView,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExportQuery {
        /// `csv` (default) or `json`.
        pub format: Option<String>,
    }
}

pub mod board {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BoardQuery {
        /// Any date of the requested week; today when absent.
        pub anchor: Option<NaiveDate>,
        /// Overrides the server date used to flag today's column.
        pub today: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DayView {
        pub date: NaiveDate,
        pub in_week: bool,
        pub is_today: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BoardRow {
        pub member: super::member::MemberView,
        /// Planning id per axis column, `None` for an empty cell.
        pub cells: Vec<Option<Uuid>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BoardView {
        pub service_id: Uuid,
        pub anchor: NaiveDate,
        pub previous_anchor: NaiveDate,
        pub next_anchor: NaiveDate,
        pub axis: Vec<DayView>,
        pub rows: Vec<BoardRow>,
        pub plannings: Vec<super::planning::PlanningView>,
    }
}
