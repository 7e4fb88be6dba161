//! Planning endpoints: weekly board, flat list, quick edit and export.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use axum_extra::TypedHeader;
use chrono::{Local, NaiveDate};
use uuid::Uuid;

use api_types::{
    board::{BoardQuery, BoardView},
    planning::{DateGroupView, ExportQuery, PlanningSaved, QuickEdit, QuickEditTarget},
};
use engine::ExportFormat;

use crate::{
    ServerError,
    server::{AdminHeader, ServerState},
    views,
};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn board(
    State(state): State<ServerState>,
    Path(service_id): Path<Uuid>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<BoardView>, ServerError> {
    let today = query.today.unwrap_or_else(today);
    let anchor = query.anchor.unwrap_or(today);
    let board = state.engine.planning_board(service_id, anchor).await?;
    Ok(Json(views::board(&board, today)?))
}

pub async fn by_date(
    State(state): State<ServerState>,
    Path(service_id): Path<Uuid>,
) -> Result<Json<Vec<DateGroupView>>, ServerError> {
    let groups = state.engine.plannings_by_date(service_id).await?;
    Ok(Json(groups.iter().map(views::date_group).collect()))
}

pub async fn quick_edit(
    admin: Option<TypedHeader<AdminHeader>>,
    State(state): State<ServerState>,
    Path(service_id): Path<Uuid>,
    Json(payload): Json<QuickEdit>,
) -> Result<Json<PlanningSaved>, ServerError> {
    let actor = admin.map(|TypedHeader(AdminHeader(id))| id);
    let today = today();
    let (target, anchor) = match payload.target {
        QuickEditTarget::Cell { date, member_id } => (
            engine::QuickEditTarget::Cell { date, member_id },
            payload.anchor.unwrap_or(date),
        ),
        QuickEditTarget::Planning { planning_id } => (
            engine::QuickEditTarget::Planning { planning_id },
            payload.anchor.unwrap_or(today),
        ),
    };
    let status = match payload.status {
        Some(status) => views::status_from_api(status)?,
        None => engine::PlanningStatus::default(),
    };

    let saved = state
        .engine
        .save_planning(
            service_id,
            engine::QuickEditRequest {
                target,
                task: payload.task,
                status,
                notes: payload.notes,
            },
            actor.as_deref(),
            anchor,
        )
        .await?;

    let planning = saved
        .board
        .plannings
        .iter()
        .find(|view| view.planning.id == saved.planning.id)
        .map(views::planning)
        .unwrap_or_else(|| {
            views::planning(&engine::PlanningView {
                planning: saved.planning.clone(),
                assignments: Vec::new(),
            })
        });

    Ok(Json(PlanningSaved {
        planning,
        board: views::board(&saved.board, today)?,
    }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(planning_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_planning(planning_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn export(
    State(state): State<ServerState>,
    Path(service_id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let format = match query.format.as_deref() {
        Some(format) => ExportFormat::try_from(format)?,
        None => ExportFormat::default(),
    };
    let body = state.engine.export_plannings(service_id, format).await?;
    Ok(([(header::CONTENT_TYPE, format.content_type())], body))
}
