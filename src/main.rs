use std::sync::Arc;

use axum::{
    http::{HeaderName, HeaderValue},
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{info, warn};

mod config;
mod db;
mod error;
mod handlers;
mod models;

use crate::config::{Config, UNKNOWN_HOST};
use crate::db::{MemoryRoomStore, PgRoomStore, RoomStore};

/// Response header naming the instance that served a request.
pub const POD_HOST_HEADER: &str = "x-pod-host";

/// Shared application state — cheap to clone (all heap behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RoomStore>,
    pub pod_host: HeaderValue,
}

impl AppState {
    pub fn new(store: Arc<dyn RoomStore>, pod_host: &str) -> Self {
        Self {
            store,
            pod_host: HeaderValue::from_str(pod_host)
                .unwrap_or_else(|_| HeaderValue::from_static(UNKNOWN_HOST)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,rooms_service=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!(pod_host = %config.pod_host, "Starting rooms service");

    let store: Arc<dyn RoomStore> = match &config.database_url {
        Some(url) => {
            info!("Connecting to PostgreSQL...");
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await?;
            info!("Database connection pool established.");

            info!("Running migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Migrations complete.");

            Arc::new(PgRoomStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; rooms are kept in memory and lost on exit");
            Arc::new(MemoryRoomStore::new())
        }
    };

    let app = build_router(AppState::new(store, &config.pod_host));

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    let pod_host = state.pod_host.clone();

    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Rooms ───────────────────────────────────────────────────────────
        .route(
            "/rooms",
            get(handlers::rooms::list_rooms).post(handlers::rooms::create_room),
        )
        .route(
            "/rooms/",
            get(handlers::rooms::missing_room_id).delete(handlers::rooms::missing_room_id),
        )
        .route(
            "/rooms/:id",
            get(handlers::rooms::get_room).delete(handlers::rooms::delete_room),
        )
        .fallback(handlers::not_found)

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(POD_HOST_HEADER),
            pod_host,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
