//! Domain layer: business logic behind the REST surface.

pub mod auth_service;
pub mod category_service;
pub mod dashboard_service;
pub mod errors;
pub mod export_service;
pub mod models;
pub mod settings_service;
pub mod transaction_service;
pub mod trend;

pub use auth_service::AuthService;
pub use category_service::CategoryService;
pub use dashboard_service::DashboardService;
pub use errors::{DomainError, DomainResult};
pub use export_service::ExportService;
pub use settings_service::SettingsService;
pub use transaction_service::TransactionService;
