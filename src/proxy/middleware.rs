use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use crate::shared::{AppError, AppState};

/// Bearer token check for the storage routes. Passes everything through when
/// the service runs without a token.
/// Usage: .layer(middleware::from_fn_with_state(state.clone(), bearer_auth))
#[instrument(skip_all, fields(uri = %req.uri()))]
pub async fn bearer_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.auth_token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header in request");
            AppError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    if token != expected {
        warn!("Bearer token rejected");
        return Err(AppError::Unauthorized("Invalid token".to_string()));
    }

    debug!("Bearer token accepted");
    Ok(next.run(req).await)
}
