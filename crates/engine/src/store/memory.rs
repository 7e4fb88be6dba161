use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::{
    Assignment, EngineError, Member, MemberStatus, NewAssignment, NewMember, NewPlanning,
    NewProfile, NewService, Planning, Profile, ResultEngine, Service,
};

use super::{RecordStore, StoreOp};

#[derive(Default)]
struct State {
    services: Vec<Service>,
    profiles: Vec<Profile>,
    members: Vec<Member>,
    plannings: Vec<Planning>,
    assignments: Vec<Assignment>,
    failing: HashSet<StoreOp>,
    calls: Vec<StoreOp>,
}

/// In-memory [`RecordStore`].
///
/// Every call is recorded, and any operation can be made to fail with
/// [`MemoryStore::fail_on`] to reproduce partial commits.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call of `op` fail with [`EngineError::Store`].
    pub async fn fail_on(&self, op: StoreOp) {
        self.state.lock().await.failing.insert(op);
    }

    /// Undoes [`MemoryStore::fail_on`] for `op`.
    pub async fn recover(&self, op: StoreOp) {
        self.state.lock().await.failing.remove(&op);
    }

    /// Operations called so far, in call order.
    pub async fn calls(&self) -> Vec<StoreOp> {
        self.state.lock().await.calls.clone()
    }

    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    async fn begin(&self, op: StoreOp) -> ResultEngine<MutexGuard<'_, State>> {
        let mut state = self.state.lock().await;
        state.calls.push(op);
        if state.failing.contains(&op) {
            return Err(EngineError::Store(format!("injected failure on {op}")));
        }
        Ok(state)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_services(&self, active_only: bool) -> ResultEngine<Vec<Service>> {
        let state = self.begin(StoreOp::ListServices).await?;
        let mut services: Vec<Service> = state
            .services
            .iter()
            .filter(|s| !active_only || s.is_active)
            .cloned()
            .collect();
        services.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(services)
    }

    async fn get_service(&self, id: Uuid) -> ResultEngine<Option<Service>> {
        let state = self.begin(StoreOp::GetService).await?;
        Ok(state.services.iter().find(|s| s.id == id).cloned())
    }

    async fn insert_service(&self, new: NewService) -> ResultEngine<Service> {
        let mut state = self.begin(StoreOp::InsertService).await?;
        let service = new.into_service(Uuid::new_v4());
        state.services.push(service.clone());
        Ok(service)
    }

    async fn update_service(&self, service: &Service) -> ResultEngine<()> {
        let mut state = self.begin(StoreOp::UpdateService).await?;
        let slot = state
            .services
            .iter_mut()
            .find(|s| s.id == service.id)
            .ok_or_else(|| EngineError::KeyNotFound("service not exists".to_string()))?;
        *slot = service.clone();
        Ok(())
    }

    async fn get_profile(&self, id: Uuid) -> ResultEngine<Option<Profile>> {
        let state = self.begin(StoreOp::GetProfile).await?;
        Ok(state.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn list_profiles(&self) -> ResultEngine<Vec<Profile>> {
        let state = self.begin(StoreOp::ListProfiles).await?;
        let mut profiles = state.profiles.clone();
        profiles.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(profiles)
    }

    async fn insert_profile(&self, new: NewProfile) -> ResultEngine<Profile> {
        let mut state = self.begin(StoreOp::InsertProfile).await?;
        let profile = new.into_profile(Uuid::new_v4());
        state.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn list_members(
        &self,
        service_id: Uuid,
        status: Option<MemberStatus>,
    ) -> ResultEngine<Vec<Member>> {
        let state = self.begin(StoreOp::ListMembers).await?;
        Ok(state
            .members
            .iter()
            .filter(|m| m.service_id == service_id)
            .filter(|m| status.is_none_or(|status| m.status == status))
            .cloned()
            .collect())
    }

    async fn get_member(&self, id: Uuid) -> ResultEngine<Option<Member>> {
        let state = self.begin(StoreOp::GetMember).await?;
        Ok(state.members.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_member(&self, new: NewMember) -> ResultEngine<Member> {
        let mut state = self.begin(StoreOp::InsertMember).await?;
        let member = new.into_member(Uuid::new_v4(), Utc::now());
        state.members.push(member.clone());
        Ok(member)
    }

    async fn set_member_status(&self, id: Uuid, status: MemberStatus) -> ResultEngine<()> {
        let mut state = self.begin(StoreOp::SetMemberStatus).await?;
        let member = state
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| EngineError::KeyNotFound("member not exists".to_string()))?;
        member.status = status;
        Ok(())
    }

    async fn list_plannings(&self, service_id: Uuid) -> ResultEngine<Vec<Planning>> {
        let state = self.begin(StoreOp::ListPlannings).await?;
        let mut plannings: Vec<Planning> = state
            .plannings
            .iter()
            .filter(|p| p.service_id == service_id)
            .cloned()
            .collect();
        plannings.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(plannings)
    }

    async fn get_planning(&self, id: Uuid) -> ResultEngine<Option<Planning>> {
        let state = self.begin(StoreOp::GetPlanning).await?;
        Ok(state.plannings.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_planning(&self, new: NewPlanning) -> ResultEngine<Planning> {
        let mut state = self.begin(StoreOp::InsertPlanning).await?;
        let planning = new.into_planning(Uuid::new_v4(), Utc::now());
        state.plannings.push(planning.clone());
        Ok(planning)
    }

    async fn update_planning(&self, planning: &Planning) -> ResultEngine<()> {
        let mut state = self.begin(StoreOp::UpdatePlanning).await?;
        let slot = state
            .plannings
            .iter_mut()
            .find(|p| p.id == planning.id)
            .ok_or_else(|| EngineError::KeyNotFound("planning not exists".to_string()))?;
        *slot = planning.clone();
        Ok(())
    }

    async fn delete_planning(&self, id: Uuid) -> ResultEngine<()> {
        let mut state = self.begin(StoreOp::DeletePlanning).await?;
        state.plannings.retain(|p| p.id != id);
        Ok(())
    }

    async fn list_assignments(&self, planning_id: Uuid) -> ResultEngine<Vec<Assignment>> {
        let state = self.begin(StoreOp::ListAssignments).await?;
        Ok(state
            .assignments
            .iter()
            .filter(|a| a.planning_id == planning_id)
            .cloned()
            .collect())
    }

    async fn insert_assignment(&self, new: NewAssignment) -> ResultEngine<Assignment> {
        let mut state = self.begin(StoreOp::InsertAssignment).await?;
        let assignment = new.into_assignment(Uuid::new_v4());
        state.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn delete_assignments(&self, planning_id: Uuid) -> ResultEngine<u64> {
        let mut state = self.begin(StoreOp::DeleteAssignments).await?;
        let before = state.assignments.len();
        state.assignments.retain(|a| a.planning_id != planning_id);
        Ok((before - state.assignments.len()) as u64)
    }
}
