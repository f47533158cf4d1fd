use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use hyper::StatusCode;
use serde::Deserialize;

use super::{accounts::find_account, extract::QueryParams, required};
use crate::{
    AppState,
    error::AppError,
    logs::{self, LogPage, LogQuery},
    models::response::ApiResponse,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogParams {
    pub account_id: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

async fn load_page(state: &AppState, params: LogParams) -> Result<LogPage, AppError> {
    let account_id = required(params.account_id, "accountId")?;
    let query = LogQuery::from_params(params.page, params.limit, params.status.as_deref())
        .map_err(AppError::bad_request)?;

    let account = find_account(state, &account_id).await?;
    let entries = state.plunk.email_logs(&account.secret_key).await?;

    Ok(logs::paginate(entries, &query))
}

pub async fn email_log(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LogParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = load_page(&state, params).await?;
    let response = ApiResponse::ok("Email logs retrieved successfully", page);
    Ok((StatusCode::OK, Json(response)))
}

/// Recipients of the requested page as plain text, one per line.
pub async fn export_email_log(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LogParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = load_page(&state, params).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        logs::export_recipients(&page.data),
    ))
}
