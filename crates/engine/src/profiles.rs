//! Profiles table (minimal entity).
//!
//! A profile is a person owned by the authentication backend. Memberships and
//! assignments reference it by `id` and resolve it with a point lookup.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ResultEngine, util::parse_uuid};

/// Name shown when a profile cannot be resolved.
pub const UNKNOWN_PROFILE_NAME: &str = "Utilisateur inconnu";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: String,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(UNKNOWN_PROFILE_NAME)
    }
}

#[derive(Clone, Debug, Default)]
pub struct NewProfile {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: String,
}

impl NewProfile {
    pub(crate) fn into_profile(self, id: Uuid) -> Profile {
        Profile {
            id,
            full_name: self.full_name,
            email: self.email,
            role: self.role,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Profile {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "profile")?,
            full_name: model.full_name,
            email: model.email,
            role: model.role,
        })
    }
}

impl From<&Profile> for ActiveModel {
    fn from(value: &Profile) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            full_name: ActiveValue::Set(value.full_name.clone()),
            email: ActiveValue::Set(value.email.clone()),
            role: ActiveValue::Set(value.role.clone()),
        }
    }
}
