use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{AppState, config::Config, error::AppError};

pub mod accounts;
pub mod email_log;
pub mod extract;
pub mod provider;
pub mod subscribers;


pub fn router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/accounts",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route(
            "/api/accounts/{id}",
            get(accounts::get_account)
                .put(accounts::update_account)
                .delete(accounts::delete_account),
        )
        .route(
            "/api/subscribers",
            get(subscribers::get_subscribers).post(subscribers::subscribe),
        )
        .route("/api/check-status", post(provider::check_status))
        .route("/api/send-email", post(provider::send_email))
        .route("/api/track-event", post(provider::track_event))
        .route("/api/email/log", get(email_log::email_log))
        .route("/api/email/log/export", get(email_log::export_email_log))
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .layer(cors_layer(config.cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::permissive();
    };

    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            tracing::warn!("Ignoring invalid CORS_ORIGIN {origin:?}: {e}");
            CorsLayer::permissive()
        }
    }
}

/// Returns the value if present and not blank, otherwise a 400 naming `field`.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::bad_request(format!("{field} is required")))
}
