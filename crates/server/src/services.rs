//! Service administration endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use api_types::service::{ServiceActive, ServiceList, ServiceNew, ServiceUpdate, ServiceView};

use crate::{ServerError, server::ServerState, views};

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ServiceList>,
) -> Result<Json<Vec<ServiceView>>, ServerError> {
    let services = state
        .engine
        .list_services(query.active_only.unwrap_or(false))
        .await?
        .into_iter()
        .map(views::service)
        .collect();
    Ok(Json(services))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceNew>,
) -> Result<(StatusCode, Json<ServiceView>), ServerError> {
    let service = state
        .engine
        .create_service(engine::NewService {
            name: payload.name,
            display_name: payload.display_name,
            emoji: payload.emoji,
            description: payload.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(views::service(service))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ServiceUpdate>,
) -> Result<Json<ServiceView>, ServerError> {
    let service = state
        .engine
        .update_service(
            id,
            &payload.display_name,
            payload.emoji.as_deref(),
            payload.description.as_deref(),
        )
        .await?;
    Ok(Json(views::service(service)))
}

pub async fn set_active(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ServiceActive>,
) -> Result<Json<ServiceView>, ServerError> {
    let service = state
        .engine
        .set_service_active(id, payload.is_active)
        .await?;
    Ok(Json(views::service(service)))
}
