//! Record store contract.
//!
//! The engine never talks to a database directly: every read and write goes
//! through a [`RecordStore`], one independent round trip per call. Multi-step
//! protocols built on top of it (see [`QuickEditSession::commit`]) are *not*
//! atomic.
//!
//! [`QuickEditSession::commit`]: crate::QuickEditSession::commit

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    Assignment, Member, MemberStatus, NewAssignment, NewMember, NewPlanning, NewProfile,
    NewService, Planning, Profile, ResultEngine, Service,
};

mod memory;
mod sea;

pub use memory::MemoryStore;
pub use sea::SeaOrmStore;

/// Identifies one store operation. Used for logging and by
/// [`MemoryStore`] for call recording and failure injection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreOp {
    ListServices,
    GetService,
    InsertService,
    UpdateService,
    GetProfile,
    ListProfiles,
    InsertProfile,
    ListMembers,
    GetMember,
    InsertMember,
    SetMemberStatus,
    ListPlannings,
    GetPlanning,
    InsertPlanning,
    UpdatePlanning,
    DeletePlanning,
    ListAssignments,
    InsertAssignment,
    DeleteAssignments,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Table-query contract over `services`, `profiles`, `service_members`,
/// `plannings` and `planning_assignments`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Services ordered by display name.
    async fn list_services(&self, active_only: bool) -> ResultEngine<Vec<Service>>;
    async fn get_service(&self, id: Uuid) -> ResultEngine<Option<Service>>;
    async fn insert_service(&self, new: NewService) -> ResultEngine<Service>;
    /// Overwrites the stored row with the same id.
    async fn update_service(&self, service: &Service) -> ResultEngine<()>;

    async fn get_profile(&self, id: Uuid) -> ResultEngine<Option<Profile>>;
    /// Profiles ordered by full name.
    async fn list_profiles(&self) -> ResultEngine<Vec<Profile>>;
    async fn insert_profile(&self, new: NewProfile) -> ResultEngine<Profile>;

    /// Memberships of a service, optionally filtered by status.
    async fn list_members(
        &self,
        service_id: Uuid,
        status: Option<MemberStatus>,
    ) -> ResultEngine<Vec<Member>>;
    async fn get_member(&self, id: Uuid) -> ResultEngine<Option<Member>>;
    async fn insert_member(&self, new: NewMember) -> ResultEngine<Member>;
    async fn set_member_status(&self, id: Uuid, status: MemberStatus) -> ResultEngine<()>;

    /// Plannings of a service ordered by date, most recent first, then by
    /// insertion within a date.
    async fn list_plannings(&self, service_id: Uuid) -> ResultEngine<Vec<Planning>>;
    async fn get_planning(&self, id: Uuid) -> ResultEngine<Option<Planning>>;
    async fn insert_planning(&self, new: NewPlanning) -> ResultEngine<Planning>;
    /// Overwrites the stored row with the same id.
    async fn update_planning(&self, planning: &Planning) -> ResultEngine<()>;
    async fn delete_planning(&self, id: Uuid) -> ResultEngine<()>;

    async fn list_assignments(&self, planning_id: Uuid) -> ResultEngine<Vec<Assignment>>;
    async fn insert_assignment(&self, new: NewAssignment) -> ResultEngine<Assignment>;
    /// Deletes every assignment of `planning_id`, returning how many were
    /// removed. Removing none is not an error.
    async fn delete_assignments(&self, planning_id: Uuid) -> ResultEngine<u64>;
}
