//! Endpoints forwarded to Plunk with the account's secret key attached.

use axum::extract::State;

use super::{accounts::find_account, extract::JsonBody, required};
use crate::{
    AppState,
    error::AppError,
    models::email::{CheckStatusRequest, SendEmailRequest, TrackEventRequest},
    plunk::{ProviderReply, SendBody, TrackBody},
};

/// Accepts either a raw `secretKey` or the id of a stored account.
pub async fn check_status(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CheckStatusRequest>,
) -> Result<ProviderReply, AppError> {
    let secret_key = match (
        payload.secret_key.filter(|k| !k.trim().is_empty()),
        payload.account_id.filter(|id| !id.trim().is_empty()),
    ) {
        (Some(key), _) => key,
        (None, Some(account_id)) => find_account(&state, &account_id).await?.secret_key,
        (None, None) => {
            return Err(AppError::bad_request("secretKey or accountId is required"));
        }
    };

    Ok(state.plunk.verify_key(secret_key.trim()).await?)
}

pub async fn send_email(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SendEmailRequest>,
) -> Result<ProviderReply, AppError> {
    let account_id = required(payload.account_id, "accountId")?;
    let to = payload
        .to
        .ok_or_else(|| AppError::bad_request("to is required"))?;
    if to.has_blank() {
        return Err(AppError::bad_request("to must not contain blank addresses"));
    }
    let subject = required(payload.subject, "subject")?;
    let content = required(payload.content, "content")?;

    let account = find_account(&state, &account_id).await?;
    let body = SendBody {
        to,
        subject,
        body: content,
        subscribed: payload.subscribed,
        name: payload.name,
        from: payload.from,
        reply: payload.reply,
        headers: payload.headers,
    };

    let reply = state.plunk.send(&account.secret_key, &body).await?;
    tracing::info!(account = %account.id, status = %reply.status, "email forwarded");
    Ok(reply)
}

pub async fn track_event(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<TrackEventRequest>,
) -> Result<ProviderReply, AppError> {
    let account_id = required(payload.account_id, "accountId")?;
    let event = required(payload.event, "event")?;
    let email = required(payload.email, "email")?;

    let account = find_account(&state, &account_id).await?;
    let body = TrackBody {
        event,
        email,
        subscribed: payload.subscribed,
        data: payload.data,
    };

    Ok(state.plunk.track(&account.secret_key, &body).await?)
}
