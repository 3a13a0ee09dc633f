//! # REST API for Settings

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

use crate::domain::DomainResult;
use crate::rest::{AppState, CurrentUser};
use shared::UpdateSettingsRequest;

pub async fn get_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> DomainResult<impl IntoResponse> {
    info!("GET /api/settings - user: {}", user.id);

    let settings = state.settings_service.get_settings(&user.id).await?;
    Ok(Json(settings))
}

pub async fn update_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<UpdateSettingsRequest>,
) -> DomainResult<impl IntoResponse> {
    info!(
        "PUT /api/settings - user: {}, perspective: {}",
        user.id, request.perspective
    );

    let settings = state
        .settings_service
        .set_perspective(&user.id, request.perspective)
        .await?;
    Ok(Json(settings))
}
