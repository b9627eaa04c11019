//! Producer ingestion handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;

use notihub_core::AppError;
use notihub_core::types::EventRecord;

use crate::dto::response::NotifyResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/notify: submit one event for fan-out
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<EventRecord>, JsonRejection>,
) -> Result<Json<NotifyResponse>, ApiError> {
    let token = headers
        .get(state.config.auth.header_name.as_str())
        .and_then(|v| v.to_str().ok());

    let outcome = match body {
        Ok(Json(record)) => state.ingest.submit(token, record).await?,
        Err(rejection) => {
            // Bad credentials outrank a malformed body.
            if !state.ingest.authorize(token) {
                return Err(AppError::unauthorized("Invalid or missing shared secret").into());
            }
            return Err(rejection.into());
        }
    };

    Ok(Json(NotifyResponse::from(outcome)))
}
