use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Assignment, AssignmentView, DateGroup, EngineError, MemberStatus, MemberView, NewAssignment,
    NewPlanning, Planning, PlanningBoard, PlanningStatus, PlanningView, Profile, ResultEngine,
    board::group_by_date,
    session::{CellTarget, Draft, QuickEditSession},
};

use super::Engine;

/// What a quick-edit session is opened on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuickEditTarget {
    /// A cell of the weekly view; the existing planning, if any, is detected.
    Cell { date: NaiveDate, member_id: Uuid },
    /// A planning of the flat list; the cell is the first assignee's.
    Planning { planning_id: Uuid },
}

/// One-shot quick edit: open, fill, commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickEditRequest {
    pub target: QuickEditTarget,
    pub task: String,
    #[serde(default)]
    pub status: PlanningStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Result of a successful commit: the stored planning and the refreshed
/// weekly view.
#[derive(Clone, Debug)]
pub struct SavedPlanning {
    pub planning: Planning,
    pub board: PlanningBoard,
}

type ProfileCache = HashMap<Uuid, Option<Profile>>;

impl Engine {
    /// Weekly view of a service around `anchor`.
    pub async fn planning_board(
        &self,
        service_id: Uuid,
        anchor: NaiveDate,
    ) -> ResultEngine<PlanningBoard> {
        self.require_service(service_id).await?;
        let members = self.active_member_views(service_id).await?;
        let plannings = self.planning_views(service_id).await?;
        Ok(PlanningBoard::build(service_id, anchor, members, plannings))
    }

    /// Every planning of a service with its assignees, most recent first.
    pub async fn list_plannings(&self, service_id: Uuid) -> ResultEngine<Vec<PlanningView>> {
        self.require_service(service_id).await?;
        self.planning_views(service_id).await
    }

    /// Flat list view: plannings grouped by date, most recent date first.
    pub async fn plannings_by_date(&self, service_id: Uuid) -> ResultEngine<Vec<DateGroup>> {
        Ok(group_by_date(&self.list_plannings(service_id).await?))
    }

    pub(super) async fn planning_views(&self, service_id: Uuid) -> ResultEngine<Vec<PlanningView>> {
        let plannings = self.store.list_plannings(service_id).await?;
        let mut cache = ProfileCache::new();
        let mut views = Vec::with_capacity(plannings.len());
        for planning in plannings {
            views.push(self.resolve_view(planning, &mut cache).await);
        }
        Ok(views)
    }

    /// A failed assignment fetch yields an unassigned planning, a failed
    /// profile lookup an unresolved assignee.
    async fn resolve_view(&self, planning: Planning, cache: &mut ProfileCache) -> PlanningView {
        let assignments = match self.store.list_assignments(planning.id).await {
            Ok(assignments) => assignments,
            Err(err) => {
                tracing::warn!("assignments of planning {} unavailable: {err}", planning.id);
                Vec::new()
            }
        };

        let mut resolved = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let profile = match cache.get(&assignment.member_id) {
                Some(profile) => profile.clone(),
                None => {
                    let profile = self.lookup_profile(assignment.member_id).await;
                    cache.insert(assignment.member_id, profile.clone());
                    profile
                }
            };
            resolved.push(AssignmentView {
                assignment,
                profile,
            });
        }
        PlanningView {
            planning,
            assignments: resolved,
        }
    }

    /// Opens a quick-edit session on a cell or on an existing planning.
    pub async fn open_quick_edit(
        &self,
        service_id: Uuid,
        target: QuickEditTarget,
    ) -> ResultEngine<QuickEditSession> {
        self.require_service(service_id).await?;
        let cell = match target {
            QuickEditTarget::Cell { date, member_id } => {
                self.cell_target(service_id, date, member_id).await?
            }
            QuickEditTarget::Planning { planning_id } => {
                self.planning_target(service_id, planning_id).await?
            }
        };

        let mut session = QuickEditSession::new();
        session.open(cell)?;
        Ok(session)
    }

    async fn cell_target(
        &self,
        service_id: Uuid,
        date: NaiveDate,
        member_id: Uuid,
    ) -> ResultEngine<CellTarget> {
        let member = self
            .store
            .get_member(member_id)
            .await?
            .filter(|m| m.service_id == service_id && m.status == MemberStatus::Active)
            .ok_or_else(|| EngineError::KeyNotFound("member not exists".to_string()))?;
        let profile = self.lookup_profile(member.user_id).await;
        let person_id = member.user_id;

        let existing = self
            .planning_views(service_id)
            .await?
            .into_iter()
            .find(|view| view.planning.date == date && view.is_assigned_to(person_id))
            .map(|view| view.planning);

        Ok(CellTarget {
            service_id,
            date,
            member: MemberView { member, profile },
            existing,
        })
    }

    async fn planning_target(
        &self,
        service_id: Uuid,
        planning_id: Uuid,
    ) -> ResultEngine<CellTarget> {
        let planning = self
            .store
            .get_planning(planning_id)
            .await?
            .filter(|p| p.service_id == service_id)
            .ok_or_else(|| EngineError::KeyNotFound("planning not exists".to_string()))?;

        let assignments = self.store.list_assignments(planning_id).await?;
        let first = assignments
            .first()
            .ok_or_else(|| EngineError::KeyNotFound("planning assignee".to_string()))?;
        let member = self
            .active_member_views(service_id)
            .await?
            .into_iter()
            .find(|view| view.person_id() == first.member_id)
            .ok_or_else(|| EngineError::KeyNotFound("active member for assignee".to_string()))?;

        Ok(CellTarget {
            service_id,
            date: planning.date,
            member,
            existing: Some(planning),
        })
    }

    pub(crate) async fn upsert_planning(
        &self,
        target: &CellTarget,
        task: String,
        status: PlanningStatus,
        notes: Option<String>,
        actor: Option<&str>,
    ) -> ResultEngine<Planning> {
        match &target.existing {
            Some(existing) => {
                let planning = Planning {
                    date: target.date,
                    task,
                    status,
                    notes,
                    created_by: existing
                        .created_by
                        .clone()
                        .or_else(|| actor.map(str::to_string)),
                    updated_at: Utc::now(),
                    ..existing.clone()
                };
                self.store.update_planning(&planning).await?;
                tracing::info!("planning {} updated", planning.id);
                Ok(planning)
            }
            None => {
                let planning = self
                    .store
                    .insert_planning(NewPlanning {
                        service_id: target.service_id,
                        date: target.date,
                        task,
                        status,
                        notes,
                        created_by: actor.map(str::to_string),
                    })
                    .await?;
                tracing::info!("planning {} created on {}", planning.id, planning.date);
                Ok(planning)
            }
        }
    }

    /// Leaves `person_id` as the only assignee of the planning.
    pub(crate) async fn replace_assignment(
        &self,
        planning_id: Uuid,
        person_id: Uuid,
    ) -> ResultEngine<Assignment> {
        let removed = self.store.delete_assignments(planning_id).await?;
        tracing::debug!("removed {removed} assignments of planning {planning_id}");
        self.store
            .insert_assignment(NewAssignment {
                planning_id,
                member_id: person_id,
                individual_status: PlanningStatus::Planned,
            })
            .await
    }

    /// Deletes a planning after its assignments.
    pub async fn delete_planning(&self, planning_id: Uuid) -> ResultEngine<Planning> {
        let planning = self
            .store
            .get_planning(planning_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("planning not exists".to_string()))?;
        let removed = self.store.delete_assignments(planning_id).await?;
        self.store.delete_planning(planning_id).await?;
        tracing::info!("planning {planning_id} deleted with {removed} assignments");
        Ok(planning)
    }

    /// Opens a session on `request.target`, fills it and commits it.
    ///
    /// A blank task is refused before the session is opened.
    pub async fn save_planning(
        &self,
        service_id: Uuid,
        request: QuickEditRequest,
        actor: Option<&str>,
        anchor: NaiveDate,
    ) -> ResultEngine<SavedPlanning> {
        let draft = Draft {
            task: request.task,
            status: request.status,
            notes: request.notes.unwrap_or_default(),
        };
        if let Err(err) = draft.validated_task() {
            tracing::warn!("quick edit refused: {err}");
            return Err(err);
        }

        let mut session = self.open_quick_edit(service_id, request.target).await?;
        session.set_task(draft.task)?;
        session.set_status(draft.status)?;
        session.set_notes(draft.notes)?;
        session.commit(self, actor, anchor).await
    }
}
