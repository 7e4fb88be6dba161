use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    EngineError, Member, MemberStatus, MemberView, NewMember, Profile, ResultEngine,
    search::profile_matches, util::normalize_optional_text,
};

use super::Engine;

impl Engine {
    /// Active members of a service with their profiles, ordered by display
    /// name.
    pub async fn list_active_members(&self, service_id: Uuid) -> ResultEngine<Vec<MemberView>> {
        self.require_service(service_id).await?;
        self.active_member_views(service_id).await
    }

    pub(super) async fn active_member_views(
        &self,
        service_id: Uuid,
    ) -> ResultEngine<Vec<MemberView>> {
        let members = self
            .store
            .list_members(service_id, Some(MemberStatus::Active))
            .await?;

        let mut views = Vec::with_capacity(members.len());
        for member in members {
            let profile = self.lookup_profile(member.user_id).await;
            views.push(MemberView { member, profile });
        }
        views.sort_by(|a, b| a.display_name().cmp(b.display_name()));
        Ok(views)
    }

    /// Profile lookup that degrades to `None` on failure.
    pub(super) async fn lookup_profile(&self, person_id: Uuid) -> Option<Profile> {
        match self.store.get_profile(person_id).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!("profile {person_id} lookup failed: {err}");
                None
            }
        }
    }

    /// Adds a person to a service. A person can hold at most one active
    /// membership per service.
    pub async fn add_member(
        &self,
        service_id: Uuid,
        user_id: Uuid,
        notes: Option<&str>,
        added_by: Option<&str>,
    ) -> ResultEngine<Member> {
        self.require_service(service_id).await?;
        if self.store.get_profile(user_id).await?.is_none() {
            return Err(EngineError::KeyNotFound("profile not exists".to_string()));
        }

        let active = self
            .store
            .list_members(service_id, Some(MemberStatus::Active))
            .await?;
        if active.iter().any(|m| m.user_id == user_id) {
            return Err(EngineError::ExistingKey(user_id.to_string()));
        }

        let member = self
            .store
            .insert_member(NewMember {
                service_id,
                user_id,
                notes: normalize_optional_text(notes),
                added_by: normalize_optional_text(added_by),
            })
            .await?;
        tracing::info!("member {} added to service {service_id}", member.id);
        Ok(member)
    }

    /// Soft-removes a membership: the row stays, marked inactive.
    pub async fn remove_member(&self, member_id: Uuid) -> ResultEngine<()> {
        let member = self
            .store
            .get_member(member_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("member not exists".to_string()))?;
        if member.status == MemberStatus::Inactive {
            return Ok(());
        }
        self.store
            .set_member_status(member_id, MemberStatus::Inactive)
            .await?;
        tracing::info!("member {member_id} deactivated");
        Ok(())
    }

    /// Profiles matching `term` that are not active members of the service.
    pub async fn available_profiles(
        &self,
        service_id: Uuid,
        term: &str,
    ) -> ResultEngine<Vec<Profile>> {
        self.require_service(service_id).await?;
        let taken: HashSet<Uuid> = self
            .store
            .list_members(service_id, Some(MemberStatus::Active))
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect();

        Ok(self
            .store
            .list_profiles()
            .await?
            .into_iter()
            .filter(|p| !taken.contains(&p.id))
            .filter(|p| profile_matches(p, term))
            .collect())
    }
}
