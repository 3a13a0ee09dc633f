//! # REST API for Categories

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::domain::models::Category;
use crate::domain::DomainResult;
use crate::rest::{AppState, CurrentUser};
use shared::{CategoryListResponse, CreateCategoryRequest};

pub async fn list_categories(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> DomainResult<impl IntoResponse> {
    info!("GET /api/categories - user: {}", user.id);

    let categories = state.category_service.list_categories(&user.id).await?;
    Ok(Json(CategoryListResponse {
        categories: categories.iter().map(Category::to_dto).collect(),
    }))
}

pub async fn create_category(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateCategoryRequest>,
) -> DomainResult<impl IntoResponse> {
    info!("POST /api/categories - user: {}, request: {:?}", user.id, request);

    let category = state
        .category_service
        .create_category(&user.id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(category.to_dto())))
}

pub async fn delete_category(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(category_id): Path<String>,
) -> DomainResult<impl IntoResponse> {
    info!("DELETE /api/categories/{} - user: {}", category_id, user.id);

    state
        .category_service
        .delete_category(&user.id, &category_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
