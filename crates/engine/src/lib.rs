//! Domain engine of the service planning application.
//!
//! Services group members; members are scheduled on dated plannings through
//! assignments. The [`Engine`] aggregates records from a [`RecordStore`] into
//! the weekly member × date view ([`PlanningBoard`]) and the flat by-date
//! list, and drives the [`QuickEditSession`] that creates, updates and
//! deletes plannings.

pub use board::{AssignmentView, DateGroup, MemberView, PlanningBoard, PlanningView};
pub use error::EngineError;
pub use export::{ExportFormat, ExportRow};
pub use ops::{Engine, EngineBuilder, QuickEditRequest, QuickEditTarget, SavedPlanning};
pub use planning_assignments::{Assignment, NewAssignment};
pub use plannings::{NewPlanning, Planning};
pub use profiles::{NewProfile, Profile, UNKNOWN_PROFILE_NAME};
pub use service_members::{Member, NewMember};
pub use services::{NewService, Service};
pub use session::{CellTarget, Draft, QuickEditSession, SessionPhase, TaskPreset};
pub use status::{MemberStatus, PlanningStatus, StatusTone};
pub use store::{MemoryStore, RecordStore, SeaOrmStore, StoreOp};

pub mod board;
pub mod calendar;
mod error;
pub mod export;
mod ops;
mod planning_assignments;
mod plannings;
mod profiles;
pub mod search;
mod service_members;
mod services;
mod session;
mod status;
mod store;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
