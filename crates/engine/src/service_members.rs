//! Service memberships: the link between a person (profile) and a service.
//!
//! At most one *active* membership may exist per `(service_id, user_id)`. The
//! engine checks it before inserting; the table itself does not enforce it.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MemberStatus, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub service_id: Uuid,
    /// Person identifier (the profile id), not a membership id.
    pub user_id: Uuid,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub added_by: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewMember {
    pub service_id: Uuid,
    pub user_id: Uuid,
    pub notes: Option<String>,
    pub added_by: Option<String>,
}

impl NewMember {
    pub(crate) fn into_member(self, id: Uuid, joined_at: DateTime<Utc>) -> Member {
        Member {
            id,
            service_id: self.service_id,
            user_id: self.user_id,
            status: MemberStatus::Active,
            joined_at,
            notes: self.notes,
            added_by: self.added_by,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "service_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub service_id: String,
    pub user_id: String,
    pub status: String,
    pub joined_at: DateTimeUtc,
    pub notes: Option<String>,
    pub added_by: Option<String>,
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
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Member {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "member")?,
            service_id: parse_uuid(&model.service_id, "service")?,
            user_id: parse_uuid(&model.user_id, "profile")?,
            status: MemberStatus::try_from(model.status.as_str())?,
            joined_at: model.joined_at,
            notes: model.notes,
            added_by: model.added_by,
        })
    }
}

impl From<&Member> for ActiveModel {
    fn from(value: &Member) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            service_id: ActiveValue::Set(value.service_id.to_string()),
            user_id: ActiveValue::Set(value.user_id.to_string()),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            joined_at: ActiveValue::Set(value.joined_at),
            notes: ActiveValue::Set(value.notes.clone()),
            added_by: ActiveValue::Set(value.added_by.clone()),
        }
    }
}
