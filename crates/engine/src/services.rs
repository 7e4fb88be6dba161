//! The module contains the representation of a service (a ministry or work
//! area). Services are deactivated, never removed.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    /// Stable key of the service (e.g. `accueil`).
    pub name: String,
    pub display_name: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Fields required to create a service.
#[derive(Clone, Debug, Default)]
pub struct NewService {
    pub name: String,
    pub display_name: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
}

impl NewService {
    pub(crate) fn into_service(self, id: Uuid) -> Service {
        Service {
            id,
            name: self.name,
            display_name: self.display_name,
            emoji: self.emoji,
            description: self.description,
            is_active: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::service_members::Entity")]
    Members,
    #[sea_orm(has_many = "super::plannings::Entity")]
    Plannings,
}

impl Related<super::service_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::plannings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plannings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Service {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "service")?,
            name: model.name,
            display_name: model.display_name,
            emoji: model.emoji,
            description: model.description,
            is_active: model.is_active,
        })
    }
}

impl From<&Service> for ActiveModel {
    fn from(value: &Service) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            display_name: ActiveValue::Set(value.display_name.clone()),
            emoji: ActiveValue::Set(value.emoji.clone()),
            description: ActiveValue::Set(value.description.clone()),
            is_active: ActiveValue::Set(value.is_active),
        }
    }
}
