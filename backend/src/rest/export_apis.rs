//! # REST API for CSV Export

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
};
use tracing::info;

use crate::domain::DomainResult;
use crate::rest::{AppState, CurrentUser};

/// Download the user's full transaction history as CSV.
pub async fn export_csv(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> DomainResult<impl IntoResponse> {
    info!("GET /api/export/csv - user: {}", user.id);

    let export = state.export_service.export_transactions_csv(&user.id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", export.filename))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }
    Ok((headers, export.content))
}
