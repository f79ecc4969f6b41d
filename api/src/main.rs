//! Microblog API Server
//!
//! A small Twitter-style backend: users, tweets with image attachments,
//! likes and follows. Uses hexagonal (ports & adapters) architecture for
//! clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tokio::signal;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    connect_with_retry, create_schema, PostgresFollowRepository, PostgresLikeRepository,
    PostgresMediaRepository, PostgresTweetRepository, PostgresUserRepository,
};
use app::{MediaService, TweetService, UserService};
use config::Config;
use error::AppError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository, PostgresFollowRepository>>,
    pub tweet_service: Arc<
        TweetService<PostgresTweetRepository, PostgresMediaRepository, PostgresLikeRepository>,
    >,
    pub media_service: Arc<MediaService<PostgresMediaRepository>>,
    pub db: DatabaseConnection,
    pub config: Config,
}

impl AppState {
    /// Wire the Postgres repositories into the services
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
        let follow_repo = Arc::new(PostgresFollowRepository::new(db.clone()));
        let tweet_repo = Arc::new(PostgresTweetRepository::new(db.clone()));
        let media_repo = Arc::new(PostgresMediaRepository::new(db.clone()));
        let like_repo = Arc::new(PostgresLikeRepository::new(db.clone()));

        Self {
            user_service: Arc::new(UserService::new(user_repo, follow_repo)),
            tweet_service: Arc::new(TweetService::new(
                tweet_repo,
                media_repo.clone(),
                like_repo,
            )),
            media_service: Arc::new(MediaService::new(media_repo)),
            db,
            config,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database: &'static str,
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                version: env!("CARGO_PKG_VERSION"),
                database: "up",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed to reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    version: env!("CARGO_PKG_VERSION"),
                    database: "down",
                }),
            )
        }
    }
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Build the HTTP router
pub fn router(state: AppState) -> anyhow::Result<Router> {
    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .ok_or_else(|| anyhow!("Invalid rate limiter configuration"))?,
    );

    let registration_routes = Router::new()
        .route("/api/users", post(handlers::register))
        .layer(GovernorLayer {
            config: governor_config.clone(),
        });

    let upload_routes = Router::new()
        .route("/api/medias", post(handlers::upload_media))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(GovernorLayer {
            config: governor_config,
        });

    let protected_routes = Router::new()
        .route("/api/users/me", get(handlers::get_me))
        .route("/api/users/:id", get(handlers::get_user))
        .route(
            "/api/users/:id/follow",
            post(handlers::follow).delete(handlers::unfollow),
        )
        .route(
            "/api/tweets",
            post(handlers::create_tweet).get(handlers::list_tweets),
        )
        .route("/api/tweets/:id", delete(handlers::delete_tweet))
        .route(
            "/api/tweets/:id/likes",
            post(handlers::like_tweet).delete(handlers::unlike_tweet),
        )
        .merge(upload_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Ok(Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Attachment links are public
        .route("/api/media/:id", get(handlers::download_media))
        .merge(registration_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Create the accounts listed in BOOTSTRAP_USERS
async fn seed_bootstrap_users(state: &AppState) -> anyhow::Result<()> {
    for (name, api_key) in &state.config.bootstrap_users {
        state
            .user_service
            .ensure_user(name, api_key)
            .await
            .with_context(|| format!("Failed to seed bootstrap user '{}'", name))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,microblog_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Microblog API...");

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!(
        retries = config.db_connect_retries,
        "Connecting to database..."
    );
    let db = connect_with_retry(&config)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    create_schema(&db)
        .await
        .context("Failed to create database schema")?;

    let state = AppState::new(db.clone(), config.clone());
    seed_bootstrap_users(&state).await?;

    let app = router(state)?;

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    db.close().await.context("Failed to close database pool")?;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
