use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::common::{into_response, ApiResponse, JsonBody};
use crate::core::models::AppConfig;
use crate::state::AppState;

pub async fn load_config(State(state): State<Arc<AppState>>) -> Response {
    let config = state.config.read().await.clone();
    ApiResponse::ok(config).into_response()
}

pub async fn save_config(
    State(state): State<Arc<AppState>>,
    JsonBody(config): JsonBody<AppConfig>,
) -> Response {
    into_response(state.apply_config(config).await)
}
