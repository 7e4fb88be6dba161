use uuid::Uuid;

use crate::{
    EngineError, NewProfile, Profile, ResultEngine, search::profile_matches,
    util::normalize_optional_text,
};

use super::Engine;

const DEFAULT_ROLE: &str = "member";

impl Engine {
    /// Registers a person. Profiles normally come from the authentication
    /// backend; this is used for bootstrapping.
    pub async fn create_profile(
        &self,
        full_name: Option<&str>,
        email: Option<&str>,
        role: Option<&str>,
    ) -> ResultEngine<Profile> {
        let role = normalize_optional_text(role).unwrap_or_else(|| DEFAULT_ROLE.to_string());
        self.store
            .insert_profile(NewProfile {
                full_name: normalize_optional_text(full_name),
                email: normalize_optional_text(email),
                role,
            })
            .await
    }

    pub async fn profile(&self, profile_id: Uuid) -> ResultEngine<Profile> {
        self.store
            .get_profile(profile_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("profile not exists".to_string()))
    }

    pub async fn list_profiles(&self) -> ResultEngine<Vec<Profile>> {
        self.store.list_profiles().await
    }

    /// Profiles whose name or email contains `term`, ignoring case and accents.
    pub async fn search_profiles(&self, term: &str) -> ResultEngine<Vec<Profile>> {
        Ok(self
            .store
            .list_profiles()
            .await?
            .into_iter()
            .filter(|p| profile_matches(p, term))
            .collect())
    }
}
