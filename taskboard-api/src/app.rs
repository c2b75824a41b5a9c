/// Application state and router builder
///
/// Wiring is explicit: the pool and configuration are built at process
/// start, placed into [`AppState`], and handed to every handler through
/// Axum's `State` extractor.
///
/// # Routes
///
/// ```text
/// /
/// ├── /health                        # liveness (public)
/// └── {base_path}/                   # default /api
///     ├── POST   /login              # token issuance
///     ├── POST   /users              # registration (open)
///     ├── GET    /users[/:id]        # reads (open)
///     ├── PUT    /users/:id          # owner only
///     ├── DELETE /users/:id          # owner only
///     ├── /statuses ...              # reads open, mutations authenticated
///     ├── /labels ...                # reads open, mutations authenticated
///     └── /tasks ...                 # reads open, create/update
///                                    # authenticated, delete author-only
/// ```
///
/// Authentication is enforced by the `AuthUser` extractor on the
/// handlers that need it, and ownership by the guard the handlers call
/// after loading the target resource.

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;

/// Shared application state
///
/// Cloned per request; the pool is internally reference-counted and the
/// configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let api = Router::new()
        .route("/login", post(routes::session::login))
        .route(
            "/users",
            post(routes::users::create).get(routes::users::get_all),
        )
        .route(
            "/users/:id",
            get(routes::users::get_by_id)
                .put(routes::users::update)
                .delete(routes::users::remove),
        )
        .route(
            "/statuses",
            post(routes::task_statuses::create).get(routes::task_statuses::get_all),
        )
        .route(
            "/statuses/:id",
            get(routes::task_statuses::get_by_id)
                .put(routes::task_statuses::update)
                .delete(routes::task_statuses::remove),
        )
        .route(
            "/labels",
            post(routes::labels::create).get(routes::labels::get_all),
        )
        .route(
            "/labels/:id",
            get(routes::labels::get_by_id)
                .put(routes::labels::update)
                .delete(routes::labels::remove),
        )
        .route(
            "/tasks",
            post(routes::tasks::create).get(routes::tasks::get_all),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_by_id)
                .put(routes::tasks::update)
                .delete(routes::tasks::remove),
        );

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest(&state.config.api.base_path, api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
