//! Users and posts CRUD API on axum and PostgreSQL.
//!
//! Users own posts; every post names exactly one existing user. All state lives
//! in the database and is reached through the pool carried by [`AppState`].

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Build the API router. Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let user_routes = axum::Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        );

    let post_routes = axum::Router::new()
        .route("/", get(handlers::list_posts).post(handlers::create_post))
        .route(
            "/:id",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        );

    axum::Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .nest("/users", user_routes)
        .nest("/posts", post_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
