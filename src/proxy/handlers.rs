use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::kv::remote::KvResult;
use crate::shared::{AppError, AppState};

/// Body of `POST /set/:key`. `value` is optional here so a missing field is
/// reported as a 400 with our own error body.
#[derive(Debug, Deserialize)]
pub struct SetBody {
    pub value: Option<String>,
}

/// GET /api/redis/get/:key
#[instrument(name = "kv_get", skip(state))]
pub async fn get_value(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KvResult<Option<String>>>, AppError> {
    let value = state.store.get(&key).await?;
    debug!(found = value.is_some(), "Value fetched");
    Ok(Json(KvResult { result: value }))
}

/// POST /api/redis/set/:key
///
/// Rejects a missing, malformed or empty `value` with 400
#[instrument(name = "kv_set", skip(state, body))]
pub async fn set_value(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<SetBody>, JsonRejection>,
) -> Result<Json<KvResult<&'static str>>, AppError> {
    let value = match body {
        Ok(Json(SetBody { value: Some(value) })) if !value.is_empty() => value,
        Ok(_) => {
            warn!("Set request without a value");
            return Err(AppError::BadRequest("Value is required".to_string()));
        }
        Err(rejection) => {
            warn!(error = %rejection, "Set request with unreadable body");
            return Err(AppError::BadRequest(rejection.body_text()));
        }
    };

    state.store.set(&key, &value).await?;
    info!(bytes = value.len(), "Value stored");
    Ok(Json(KvResult { result: "OK" }))
}

/// DELETE /api/redis/del/:key
#[instrument(name = "kv_del", skip(state))]
pub async fn delete_value(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KvResult<u64>>, AppError> {
    let removed = state.store.delete(&key).await?;
    info!(removed, "Value deleted");
    Ok(Json(KvResult {
        result: u64::from(removed),
    }))
}

/// GET /api/redis/exists/:key
#[instrument(name = "kv_exists", skip(state))]
pub async fn value_exists(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KvResult<u64>>, AppError> {
    let exists = state.store.exists(&key).await?;
    Ok(Json(KvResult {
        result: u64::from(exists),
    }))
}

pub async fn health() -> &'static str {
    "ok"
}
