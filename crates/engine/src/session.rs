//! Quick-edit session: the single-planning editor opened on a cell of the
//! weekly view.
//!
//! ```text
//! Closed --open--> Open --commit--> Saving --ok--> Closed
//!                   ^                  |
//!                   +------failure-----+
//! ```
//!
//! A commit with a blank task is refused before any store call and the
//! session stays open with a warning. A store failure brings the session
//! back to `Open` with the error recorded so the commit can be retried. A
//! commit dropped before it completes leaves the session `Open` as well.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, MemberView, Planning, PlanningBoard, PlanningStatus, ResultEngine,
    ops::{Engine, SavedPlanning},
    util::normalize_optional_text,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Closed,
    Open,
    Saving,
}

/// Task shortcuts offered next to the free-text field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPreset {
    Leader,
    Participant,
}

impl TaskPreset {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leader => "Leader",
            Self::Participant => "Participant",
        }
    }
}

/// Values being edited.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub task: String,
    pub status: PlanningStatus,
    pub notes: String,
}

impl Draft {
    fn from_planning(planning: &Planning) -> Self {
        Self {
            task: planning.task.clone(),
            status: planning.status,
            notes: planning.notes.clone().unwrap_or_default(),
        }
    }

    /// Trimmed task, or [`EngineError::MissingTask`] when blank.
    pub fn validated_task(&self) -> ResultEngine<String> {
        let task = self.task.trim();
        if task.is_empty() {
            return Err(EngineError::MissingTask);
        }
        Ok(task.to_string())
    }

    /// Trimmed notes; blank notes are stored as absent.
    pub fn notes(&self) -> Option<String> {
        normalize_optional_text(Some(self.notes.as_str()))
    }
}

/// The cell a session edits and the planning already shown there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTarget {
    pub service_id: uuid::Uuid,
    pub date: NaiveDate,
    pub member: MemberView,
    pub existing: Option<Planning>,
}

#[derive(Debug, Default)]
pub struct QuickEditSession {
    phase: SessionPhase,
    target: Option<CellTarget>,
    draft: Draft,
    warning: Option<String>,
    error: Option<String>,
}

impl QuickEditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the session on `target`, pre-filled from the existing planning
    /// or with an empty draft.
    pub fn open(&mut self, target: CellTarget) -> ResultEngine<()> {
        if self.phase == SessionPhase::Saving {
            return Err(EngineError::SessionState(
                "cannot open while saving".to_string(),
            ));
        }
        self.draft = target
            .existing
            .as_ref()
            .map(Draft::from_planning)
            .unwrap_or_default();
        self.target = Some(target);
        self.warning = None;
        self.error = None;
        self.phase = SessionPhase::Open;
        Ok(())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn target(&self) -> Option<&CellTarget> {
        self.target.as_ref()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Validation message of the last refused commit.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Store error of the last failed commit or delete.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `true` when the session edits an already stored planning.
    pub fn is_editing(&self) -> bool {
        self.target.as_ref().is_some_and(|t| t.existing.is_some())
    }

    fn draft_mut(&mut self) -> ResultEngine<&mut Draft> {
        if self.phase != SessionPhase::Open {
            return Err(EngineError::SessionState("session is not open".to_string()));
        }
        Ok(&mut self.draft)
    }

    pub fn set_task(&mut self, task: impl Into<String>) -> ResultEngine<()> {
        self.draft_mut()?.task = task.into();
        Ok(())
    }

    pub fn apply_preset(&mut self, preset: TaskPreset) -> ResultEngine<()> {
        self.set_task(preset.as_str())
    }

    pub fn set_status(&mut self, status: PlanningStatus) -> ResultEngine<()> {
        self.draft_mut()?.status = status;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> ResultEngine<()> {
        self.draft_mut()?.notes = notes.into();
        Ok(())
    }

    /// Discards the draft. No store call.
    pub fn cancel(&mut self) {
        if self.phase != SessionPhase::Saving {
            *self = Self::default();
        }
    }

    fn open_target(&self) -> ResultEngine<CellTarget> {
        match (self.phase, &self.target) {
            (SessionPhase::Open, Some(target)) => Ok(target.clone()),
            _ => Err(EngineError::SessionState("session is not open".to_string())),
        }
    }

    fn fail(&mut self, err: EngineError) -> EngineError {
        tracing::warn!("quick edit failed: {err}");
        self.phase = SessionPhase::Open;
        self.error = Some(err.to_string());
        err
    }

    /// Saves the draft, then refetches the weekly view around `anchor`.
    ///
    /// Once the planning row is written the session keeps targeting it, so a
    /// retry after a later failure updates that row instead of inserting a
    /// second one.
    pub async fn commit(
        &mut self,
        engine: &Engine,
        actor: Option<&str>,
        anchor: NaiveDate,
    ) -> ResultEngine<SavedPlanning> {
        let mut target = self.open_target()?;
        let task = match self.draft.validated_task() {
            Ok(task) => task,
            Err(err) => {
                tracing::warn!("quick edit refused: {err}");
                self.warning = Some(err.to_string());
                return Err(err);
            }
        };

        let mut saving = Saving::enter(self);
        let session = &mut *saving.0;

        let planning = match engine
            .upsert_planning(
                &target,
                task,
                session.draft.status,
                session.draft.notes(),
                actor,
            )
            .await
        {
            Ok(planning) => planning,
            Err(err) => return Err(session.fail(err)),
        };
        target.existing = Some(planning.clone());
        session.target = Some(target.clone());

        if let Err(err) = engine
            .replace_assignment(planning.id, target.member.person_id())
            .await
        {
            return Err(session.fail(err));
        }

        match engine.planning_board(target.service_id, anchor).await {
            Ok(board) => {
                *session = Self::default();
                Ok(SavedPlanning { planning, board })
            }
            Err(err) => Err(session.fail(err)),
        }
    }

    /// Deletes the planning being edited, then refetches the weekly view.
    pub async fn delete(&mut self, engine: &Engine, anchor: NaiveDate) -> ResultEngine<PlanningBoard> {
        let target = self.open_target()?;
        let Some(existing) = target.existing.as_ref() else {
            return Err(EngineError::SessionState(
                "nothing to delete on an empty cell".to_string(),
            ));
        };

        let mut saving = Saving::enter(self);
        let session = &mut *saving.0;

        if let Err(err) = engine.delete_planning(existing.id).await {
            return Err(session.fail(err));
        }
        // The row is gone: a later failure leaves the session on an empty cell.
        session.target = Some(CellTarget {
            existing: None,
            ..target.clone()
        });
        match engine.planning_board(target.service_id, anchor).await {
            Ok(board) => {
                *session = Self::default();
                Ok(board)
            }
            Err(err) => Err(session.fail(err)),
        }
    }
}

/// Holds a session in `Saving` for the duration of a commit or delete.
///
/// Dropping the guard while still `Saving`, e.g. when the future is dropped
/// mid-flight, puts the session back to `Open` so it can be retried or
/// cancelled.
struct Saving<'a>(&'a mut QuickEditSession);

impl<'a> Saving<'a> {
    fn enter(session: &'a mut QuickEditSession) -> Self {
        session.phase = SessionPhase::Saving;
        session.warning = None;
        session.error = None;
        Self(session)
    }
}

impl Drop for Saving<'_> {
    fn drop(&mut self) {
        if self.0.phase == SessionPhase::Saving {
            tracing::warn!("quick edit interrupted");
            self.0.phase = SessionPhase::Open;
            self.0.error = Some("save interrupted".to_string());
        }
    }
}
