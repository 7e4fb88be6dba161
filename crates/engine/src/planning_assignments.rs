//! Binding of a planning to the person responsible for it.
//!
//! `member_id` stores the person identifier (profile id), the same value as
//! [`Member::user_id`](crate::Member::user_id). It never holds a membership id.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PlanningStatus, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub planning_id: Uuid,
    pub member_id: Uuid,
    pub individual_status: PlanningStatus,
}

#[derive(Clone, Debug)]
pub struct NewAssignment {
    pub planning_id: Uuid,
    pub member_id: Uuid,
    pub individual_status: PlanningStatus,
}

impl NewAssignment {
    pub(crate) fn into_assignment(self, id: Uuid) -> Assignment {
        Assignment {
            id,
            planning_id: self.planning_id,
            member_id: self.member_id,
            individual_status: self.individual_status,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "planning_assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub planning_id: String,
    pub member_id: String,
    pub individual_status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::plannings::Entity",
        from = "Column::PlanningId",
        to = "super::plannings::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Planning,
}

impl Related<super::plannings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planning.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Assignment {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "assignment")?,
            planning_id: parse_uuid(&model.planning_id, "planning")?,
            member_id: parse_uuid(&model.member_id, "profile")?,
            individual_status: PlanningStatus::try_from(model.individual_status.as_str())?,
        })
    }
}

impl From<&Assignment> for ActiveModel {
    fn from(value: &Assignment) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            planning_id: ActiveValue::Set(value.planning_id.to_string()),
            member_id: ActiveValue::Set(value.member_id.to_string()),
            individual_status: ActiveValue::Set(value.individual_status.as_str().to_string()),
        }
    }
}
