//! # REST API for Authentication
//!
//! Register, login and logout endpoints. Register and login return a bearer
//! token; logout deletes the presented session.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::domain::DomainResult;
use crate::rest::AppState;
use shared::{AuthResponse, LoginRequest, RegisterRequest};

/// Create a new account and log it straight in
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> DomainResult<impl IntoResponse> {
    info!("POST /api/auth/register - username: {}", request.username);

    let (user, session) = state.auth_service.register(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: session.token,
            user: user.to_profile(),
        }),
    ))
}

/// Exchange credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> DomainResult<impl IntoResponse> {
    info!("POST /api/auth/login - username: {}", request.username);

    let (user, session) = state.auth_service.login(request).await?;
    Ok(Json(AuthResponse {
        token: session.token,
        user: user.to_profile(),
    }))
}

/// Invalidate the presented session token. Always succeeds.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> DomainResult<impl IntoResponse> {
    info!("POST /api/auth/logout");

    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
    {
        state.auth_service.logout(token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
