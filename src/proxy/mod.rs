pub mod handlers;
pub mod middleware;

pub use handlers::{delete_value, get_value, health, set_value, value_exists};
pub use middleware::bearer_auth;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};

use crate::shared::AppState;

/// Path prefix of the storage routes
pub const API_PREFIX: &str = "/api/redis";

/// Routes of the key-value service. Only `/api/redis/*` is behind the bearer
/// check; `/health` stays public.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/get/:key", get(get_value))
        .route("/set/:key", post(set_value))
        .route("/del/:key", delete(delete_value))
        .route("/exists/:key", get(value_exists))
        .layer(from_fn_with_state(state.clone(), bearer_auth));

    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .with_state(state)
}
