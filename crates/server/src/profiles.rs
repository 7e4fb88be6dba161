use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use api_types::profile::{ProfileNew, ProfileSearch, ProfileView};

use crate::{ServerError, server::ServerState, views};

pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<ProfileSearch>,
) -> Result<Json<Vec<ProfileView>>, ServerError> {
    let profiles = match query.q.as_deref() {
        Some(term) => state.engine.search_profiles(term).await?,
        None => state.engine.list_profiles().await?,
    };
    Ok(Json(profiles.into_iter().map(views::profile).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProfileNew>,
) -> Result<(StatusCode, Json<ProfileView>), ServerError> {
    let profile = state
        .engine
        .create_profile(
            payload.full_name.as_deref(),
            payload.email.as_deref(),
            payload.role.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::profile(profile))))
}
