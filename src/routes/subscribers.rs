use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use hyper::StatusCode;
use validator::Validate;

use super::extract::JsonBody;
use crate::{
    AppState,
    error::AppError,
    models::{response::ApiResponse, subscriber::NewSubscriber},
};

pub async fn get_subscribers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let subscribers = state.subscribers.load().await?;
    let response = ApiResponse::ok("Subscribers retrieved successfully", subscribers);
    Ok((StatusCode::OK, Json(response)))
}

pub async fn subscribe(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewSubscriber>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.normalized();
    payload
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;
    let subscriber = payload
        .into_subscriber(Utc::now())
        .ok_or_else(|| AppError::bad_request("email is required"))?;

    let created = state
        .subscribers
        .update(|subscribers| {
            if subscribers
                .iter()
                .any(|s| s.email.eq_ignore_ascii_case(&subscriber.email))
            {
                tracing::info!(email = %subscriber.email, "duplicate subscription");
                return Err(AppError::Conflict("Email already subscribed".to_string()));
            }
            subscribers.push(subscriber.clone());
            Ok(subscriber)
        })
        .await?;

    let response = ApiResponse::ok("Subscription successful", created);
    Ok((StatusCode::CREATED, Json(response)))
}
