//! # REST API Interface Layer
//!
//! HTTP endpoints for the finance tracker. This layer handles request and
//! response serialization, bearer-token authentication, and translation of
//! domain errors to HTTP status codes. No business logic lives here.

pub mod auth_apis;
pub mod category_apis;
pub mod dashboard_apis;
pub mod export_apis;
pub mod settings_apis;
pub mod transaction_apis;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};

use crate::db::DbConnection;
use crate::domain::{
    models::User, AuthService, CategoryService, DashboardService, DomainError, ExportService,
    SettingsService, TransactionService,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub category_service: CategoryService,
    pub transaction_service: TransactionService,
    pub settings_service: SettingsService,
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
}

impl AppState {
    pub fn new(db: DbConnection) -> Self {
        let settings_service = SettingsService::new(db.clone());
        Self {
            auth_service: AuthService::new(db.clone()),
            category_service: CategoryService::new(db.clone()),
            transaction_service: TransactionService::new(db.clone()),
            dashboard_service: DashboardService::new(db.clone(), settings_service.clone()),
            export_service: ExportService::new(db),
            settings_service,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DomainError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            DomainError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            DomainError::Conflict(message) => (StatusCode::CONFLICT, message.clone()),
            DomainError::Internal(error) => {
                tracing::error!("Internal error: {:?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, message).into_response()
    }
}

/// The authenticated user behind the request's bearer token.
///
/// Extracting this in a handler makes the route require authentication.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(DomainError::Unauthorized)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(DomainError::Unauthorized)?;
        let user = state.auth_service.authenticate(token).await?;
        Ok(CurrentUser(user))
    }
}

/// Build the `/api` router.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/register", post(auth_apis::register))
        .route("/auth/login", post(auth_apis::login))
        .route("/auth/logout", post(auth_apis::logout))
        .route(
            "/categories",
            get(category_apis::list_categories).post(category_apis::create_category),
        )
        .route("/categories/:id", delete(category_apis::delete_category))
        .route(
            "/transactions",
            get(transaction_apis::list_transactions).post(transaction_apis::create_transaction),
        )
        .route(
            "/transactions/:id",
            put(transaction_apis::update_transaction).delete(transaction_apis::delete_transaction),
        )
        .route("/dashboard/summary", get(dashboard_apis::summary))
        .route("/dashboard/trend", get(dashboard_apis::trend))
        .route(
            "/settings",
            get(settings_apis::get_settings).put(settings_apis::update_settings),
        )
        .route("/export/csv", get(export_apis::export_csv));

    Router::new().nest("/api", api_routes).with_state(state)
}
