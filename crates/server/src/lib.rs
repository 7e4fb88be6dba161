use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{router, run, run_with_listener, spawn_with_listener};

mod members;
mod plannings;
mod profiles;
mod server;
mod services;
mod views;

pub mod types {
    pub mod service {
        pub use api_types::service::{
            ServiceActive, ServiceList, ServiceNew, ServiceUpdate, ServiceView,
        };
    }

    pub mod profile {
        pub use api_types::profile::{ProfileNew, ProfileSearch, ProfileView};
    }

    pub mod member {
        pub use api_types::member::{MemberNew, MemberView};
    }

    pub mod planning {
        pub use api_types::PlanningStatus;
        pub use api_types::planning::{
            AssigneeView, DateGroupView, ExportQuery, PlanningSaved, PlanningView, QuickEdit,
            QuickEditTarget,
        };
    }

    pub mod board {
        pub use api_types::board::{BoardQuery, BoardRow, BoardView, DayView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) | EngineError::SessionState(_) => StatusCode::CONFLICT,
        EngineError::MissingTask
        | EngineError::InvalidName(_)
        | EngineError::InvalidDate(_)
        | EngineError::InvalidStatus(_)
        | EngineError::Export(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::InvalidId(_)
        | EngineError::Store(_)
        | EngineError::Render(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Store(detail) | EngineError::InvalidId(detail) => {
            tracing::error!("record store error: {detail}");
            "internal server error".to_string()
        }
        EngineError::Render(detail) => {
            tracing::error!("export render error: {detail}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
