use axum::{extract::State, response::Response};
use std::sync::Arc;

use super::common::into_response;
use crate::core::services::PersonalService;
use crate::state::AppState;
use crate::upstream::BearerToken;

pub async fn colaboradores(State(state): State<Arc<AppState>>, token: BearerToken) -> Response {
    into_response(PersonalService::colaboradores(state.backend().await.as_ref(), &token).await)
}

pub async fn resumen(State(state): State<Arc<AppState>>, token: BearerToken) -> Response {
    into_response(PersonalService::resumen(state.backend().await.as_ref(), &token).await)
}
