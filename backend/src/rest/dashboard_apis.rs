//! # REST API for the Dashboard
//!
//! The summary endpoint returns current-month totals and the trailing six
//! months; the trend endpoint runs the forecasting pipeline. Both recompute
//! on every request.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::domain::DomainResult;
use crate::rest::{AppState, CurrentUser};
use shared::Perspective;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// Overrides the stored perspective preference for this request
    pub perspective: Option<Perspective>,
}

pub async fn summary(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> DomainResult<impl IntoResponse> {
    info!("GET /api/dashboard/summary - user: {}", user.id);

    let response = state.dashboard_service.summary(&user.id).await?;
    Ok(Json(response))
}

pub async fn trend(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<TrendQuery>,
) -> DomainResult<impl IntoResponse> {
    info!(
        "GET /api/dashboard/trend - user: {}, perspective: {:?}",
        user.id, query.perspective
    );

    let response = state
        .dashboard_service
        .trend_report(&user.id, query.perspective)
        .await?;
    Ok(Json(response))
}
