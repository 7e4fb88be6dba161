//! The module contains the representation of a planning: one unit of work
//! scheduled on one calendar date for one service.
//!
//! Dates are stored as `YYYY-MM-DD` strings, whose lexicographic order is the
//! chronological order. Plannings sharing a date are listed by `created_at`,
//! which never changes after insert.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PlanningStatus, ResultEngine, calendar, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planning {
    pub id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub task: String,
    pub status: PlanningStatus,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewPlanning {
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub task: String,
    pub status: PlanningStatus,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

impl NewPlanning {
    pub(crate) fn into_planning(self, id: Uuid, now: DateTime<Utc>) -> Planning {
        Planning {
            id,
            service_id: self.service_id,
            date: self.date,
            task: self.task,
            status: self.status,
            notes: self.notes,
            created_by: self.created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "plannings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub service_id: String,
    pub date: String,
    pub task: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Service,
    #[sea_orm(has_many = "super::planning_assignments::Entity")]
    Assignments,
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::planning_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Planning {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "planning")?,
            service_id: parse_uuid(&model.service_id, "service")?,
            date: calendar::parse_date(&model.date)?,
            task: model.task,
            status: PlanningStatus::try_from(model.status.as_str())?,
            notes: model.notes,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&Planning> for ActiveModel {
    fn from(value: &Planning) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            service_id: ActiveValue::Set(value.service_id.to_string()),
            date: ActiveValue::Set(calendar::format_date(value.date)),
            task: ActiveValue::Set(value.task.clone()),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            notes: ActiveValue::Set(value.notes.clone()),
            created_by: ActiveValue::Set(value.created_by.clone()),
            created_at: ActiveValue::Set(value.created_at),
            updated_at: ActiveValue::Set(value.updated_at),
        }
    }
}
