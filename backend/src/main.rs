use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use finance_tracker_backend::db::DbConnection;
use finance_tracker_backend::rest::{router, AppState};

// Defaults, overridable via the environment
const DATABASE_URL: &str = "sqlite:finance.db";
const BIND_ADDR: [u8; 4] = [127, 0, 0, 1];
const PORT: u16 = 3000;
const FRONTEND_ORIGIN: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Setting up database");
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string());
    let db = DbConnection::new(&database_url).await?;

    let state = AppState::new(db);

    // CORS setup to allow the browser client to make requests
    let cors = CorsLayer::new()
        .allow_origin(FRONTEND_ORIGIN.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = router(state).layer(cors);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(PORT);
    let addr = SocketAddr::from((BIND_ADDR, port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
