//! Zogakzip Backend
//!
//! REST backend for the Zogakzip memory-group sharing application: groups,
//! memories (posts), comments, likes, and image uploads over SQLite.

mod api;
mod config;
mod db;
mod errors;
mod guard;
mod listing;
mod models;
mod secret;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{CommentRepository, GroupRepository, MemoryRepository};

/// Maximum accepted size of an uploaded image.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub groups: Arc<GroupRepository>,
    pub memories: Arc<MemoryRepository>,
    pub comments: Arc<CommentRepository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Zogakzip Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;

    // Ensure the upload directory exists before serving from it
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // Create application state
    let state = AppState {
        groups: Arc::new(GroupRepository::new(pool.clone())),
        memories: Arc::new(MemoryRepository::new(pool.clone())),
        comments: Arc::new(CommentRepository::new(pool)),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Groups
        .route("/groups", post(api::create_group))
        .route("/groups", get(api::list_groups))
        .route("/groups/{group_id}", get(api::get_group))
        .route("/groups/{group_id}", put(api::update_group))
        .route("/groups/{group_id}", delete(api::delete_group))
        .route(
            "/groups/{group_id}/verify-password",
            post(api::verify_group_password),
        )
        .route("/groups/{group_id}/like", post(api::like_group))
        .route("/groups/{group_id}/is-public", get(api::group_public_status))
        // Memories
        .route("/groups/{group_id}/posts", post(api::create_memory))
        .route("/groups/{group_id}/posts", get(api::list_memories))
        .route("/posts/{post_id}", get(api::get_memory))
        .route("/posts/{post_id}", put(api::update_memory))
        .route("/posts/{post_id}", delete(api::delete_memory))
        // Comments
        .route("/posts/{post_id}/comments", post(api::create_comment))
        .route("/posts/{post_id}/comments", get(api::list_comments))
        .route("/comments/{comment_id}", put(api::update_comment))
        .route("/comments/{comment_id}", delete(api::delete_comment))
        // Images
        .route(
            "/image",
            post(api::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
