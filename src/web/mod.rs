use axum::{
    Router,
    http::{Method, Uri},
    middleware as axum_middleware,
    routing::get,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::web::{error::AppError, routes::*};

pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;

#[cfg(test)]
pub mod test_client;

pub const WELCOME_TEXT: &str = "Welcome to Color Picker API";

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DatabaseConnection,
}

async fn welcome_handler() -> &'static str {
    WELCOME_TEXT
}

async fn health_check_handler() -> &'static str {
    "OK"
}

async fn not_found_handler(uri: Uri) -> AppError {
    AppError::NotFound(format!("Route {} not found", uri.path()))
}

pub fn create_axum_router(db_pool: DatabaseConnection) -> Router {
    let app_state = Arc::new(AppState { db_pool });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/", get(welcome_handler))
        .route("/api/health", get(health_check_handler))
        .nest("/api/v1/projects", project_routes::create_projects_router())
        .nest("/api/v1/palettes", palette_routes::create_palettes_router())
        .fallback(not_found_handler)
        .with_state(app_state)
        .layer(axum_middleware::from_fn(middleware::request_log::request_log))
        .layer(cors)
}
