//! HTTP surface: router, shared state, and one module per resource.
//!
//! Handlers stay thin; they decode the request, call into [`crate::core`],
//! and let [`crate::errors::Error`] render failures. Every route except
//! signup and login runs behind the [`extract::CurrentUser`] guard.

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod debts;
pub mod extract;
pub mod goals;
pub mod grocery;
pub mod profile;
pub mod relay;
pub mod transactions;

use crate::config::relay::RelayConfig;
use axum::{
    Json, Router,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Everything handlers share.
#[derive(Clone)]
pub struct AppState {
    /// Database handle
    pub db: DatabaseConnection,
    /// Outbound HTTP client, reused across relay calls
    pub http: reqwest::Client,
    /// Messaging provider credentials; `None` leaves the relay endpoint
    /// answering 500 until configured
    pub relay: Option<RelayConfig>,
}

/// Builds the full application router.
///
/// The API lives under `/api`; CORS is permissive because the browser
/// client is served from a different origin.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/session", get(auth::current_session))
        .route("/profile", get(profile::get).put(profile::update))
        .route("/profile/limits", put(profile::update_limits))
        .route("/profile/whatsapp", put(profile::connect_whatsapp))
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::delete),
        )
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            put(transactions::update).delete(transactions::delete),
        )
        .route("/dashboard", get(dashboard::get))
        .route("/goals", get(goals::list).post(goals::create))
        .route("/goals/{id}", put(goals::update).delete(goals::delete))
        .route("/goals/{id}/progress", post(goals::add_progress))
        .route("/debts", get(debts::list).post(debts::create))
        .route("/debts/{id}", put(debts::update).delete(debts::delete))
        .route("/debts/{id}/payments", post(debts::record_payment))
        .route(
            "/grocery/categories",
            get(grocery::list_categories).post(grocery::create_category),
        )
        .route("/grocery/categories/{id}", delete(grocery::delete_category))
        .route(
            "/grocery/supermarkets",
            get(grocery::list_supermarkets).post(grocery::create_supermarket),
        )
        .route(
            "/grocery/supermarkets/{id}",
            delete(grocery::delete_supermarket),
        )
        .route(
            "/grocery/items",
            get(grocery::list_items).post(grocery::create_item),
        )
        .route(
            "/grocery/items/{id}",
            put(grocery::update_item).delete(grocery::delete_item),
        )
        .route("/grocery/items/{id}/toggle", post(grocery::toggle_item))
        .route("/grocery/estimated-total", get(grocery::estimated_total))
        .route("/notifications/whatsapp", post(relay::send))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "route not found" })),
    )
}
