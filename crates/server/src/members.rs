//! Service membership endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use uuid::Uuid;

use api_types::{
    member::{MemberNew, MemberView},
    profile::{ProfileSearch, ProfileView},
};

use crate::{
    ServerError,
    server::{AdminHeader, ServerState},
    views,
};

pub async fn list(
    State(state): State<ServerState>,
    Path(service_id): Path<Uuid>,
) -> Result<Json<Vec<MemberView>>, ServerError> {
    let members = state.engine.list_active_members(service_id).await?;
    Ok(Json(members.iter().map(views::member).collect()))
}

pub async fn add(
    admin: Option<TypedHeader<AdminHeader>>,
    State(state): State<ServerState>,
    Path(service_id): Path<Uuid>,
    Json(payload): Json<MemberNew>,
) -> Result<(StatusCode, Json<MemberView>), ServerError> {
    let added_by = admin.map(|TypedHeader(AdminHeader(id))| id);
    let member = state
        .engine
        .add_member(
            service_id,
            payload.user_id,
            payload.notes.as_deref(),
            added_by.as_deref(),
        )
        .await?;
    let profile = state.engine.profile(member.user_id).await.ok();
    let view = engine::MemberView { member, profile };
    Ok((StatusCode::CREATED, Json(views::member(&view))))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(member_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.remove_member(member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Profiles that can still be added to the service.
pub async fn available(
    State(state): State<ServerState>,
    Path(service_id): Path<Uuid>,
    Query(query): Query<ProfileSearch>,
) -> Result<Json<Vec<ProfileView>>, ServerError> {
    let profiles = state
        .engine
        .available_profiles(service_id, query.q.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(profiles.into_iter().map(views::profile).collect()))
}
