use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use hyper::StatusCode;
use serde_json::{Map, Value};

use super::extract::JsonBody;
use crate::{
    AppState,
    error::AppError,
    models::{
        account::{Account, NewAccount},
        response::ApiResponse,
    },
};

pub(crate) async fn find_account(state: &AppState, id: &str) -> Result<Account, AppError> {
    state
        .accounts
        .load()
        .await?
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Account {id} not found")))
}

pub async fn list_accounts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let accounts = state.accounts.load().await?;
    let response = ApiResponse::ok("Accounts retrieved successfully", accounts);
    Ok((StatusCode::OK, Json(response)))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let account = find_account(&state, &id).await?;
    let response = ApiResponse::ok("Account retrieved successfully", account);
    Ok((StatusCode::OK, Json(response)))
}

pub async fn create_account(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewAccount>,
) -> Result<impl IntoResponse, AppError> {
    let account = payload
        .into_account(Utc::now())
        .map_err(AppError::bad_request)?;

    let created = state
        .accounts
        .update(|accounts| {
            if accounts.iter().any(|a| a.id == account.id) {
                return Err(AppError::Conflict(format!(
                    "Account {} already exists",
                    account.id
                )));
            }
            accounts.push(account.clone());
            Ok(account)
        })
        .await?;

    tracing::info!(id = %created.id, "account created");
    let response = ApiResponse::ok("Account created successfully", created);
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .accounts
        .update(|accounts| {
            let slot = accounts
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Account {id} not found")))?;
            let merged = slot
                .merged(patch)
                .map_err(|e| AppError::bad_request(format!("Invalid account update: {e}")))?;
            *slot = merged.clone();
            Ok::<_, AppError>(merged)
        })
        .await?;

    let response = ApiResponse::ok("Account updated successfully", updated);
    Ok((StatusCode::OK, Json(response)))
}

/// Deleting an unknown id is a no-op.
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let removed = state
        .accounts
        .update(|accounts| {
            let before = accounts.len();
            accounts.retain(|a| a.id != id);
            Ok::<_, AppError>(accounts.len() != before)
        })
        .await?;

    if removed {
        tracing::info!(%id, "account deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
