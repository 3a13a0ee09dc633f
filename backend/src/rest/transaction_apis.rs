//! # REST API for Transactions
//!
//! Endpoints for listing, creating, updating and deleting transactions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::domain::DomainResult;
use crate::rest::{AppState, CurrentUser};
use shared::{CreateTransactionRequest, TransactionListRequest, UpdateTransactionRequest};

// Query parameters for transaction listing API
#[derive(Debug, Deserialize)]
pub struct TransactionListQuery {
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// List transactions with optional filtering and pagination
pub async fn list_transactions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<TransactionListQuery>,
) -> DomainResult<impl IntoResponse> {
    info!("GET /api/transactions - user: {}, query: {:?}", user.id, query);

    let request = TransactionListRequest {
        after: query.after,
        limit: query.limit,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let response = state
        .transaction_service
        .list_transactions(&user.id, request)
        .await?;
    Ok(Json(response))
}

/// Record a new transaction
pub async fn create_transaction(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateTransactionRequest>,
) -> DomainResult<impl IntoResponse> {
    info!("POST /api/transactions - user: {}, request: {:?}", user.id, request);

    let transaction = state
        .transaction_service
        .create_transaction(&user.id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction.to_dto())))
}

/// Update fields of an existing transaction
pub async fn update_transaction(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(transaction_id): Path<String>,
    Json(request): Json<UpdateTransactionRequest>,
) -> DomainResult<impl IntoResponse> {
    info!("PUT /api/transactions/{} - user: {}", transaction_id, user.id);

    let transaction = state
        .transaction_service
        .update_transaction(&user.id, &transaction_id, request)
        .await?;
    Ok(Json(transaction.to_dto()))
}

/// Delete a transaction
pub async fn delete_transaction(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(transaction_id): Path<String>,
) -> DomainResult<impl IntoResponse> {
    info!("DELETE /api/transactions/{} - user: {}", transaction_id, user.id);

    state
        .transaction_service
        .delete_transaction(&user.id, &transaction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
