use axum::{
    extract::State,
    response::Response,
};
use std::sync::Arc;

use super::common::{into_response, JsonBody};
use crate::core::models::ChatbotPregunta;
use crate::core::services::ChatbotService;
use crate::state::AppState;
use crate::upstream::BearerToken;

pub async fn preguntar(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    JsonBody(pregunta): JsonBody<ChatbotPregunta>,
) -> Response {
    into_response(ChatbotService::preguntar(state.backend().await.as_ref(), &token, &pregunta).await)
}
