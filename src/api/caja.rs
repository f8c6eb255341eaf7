use axum::{
    extract::State,
    response::Response,
};
use std::sync::Arc;

use super::common::{into_response, JsonBody};
use crate::core::categoria::RegistroCaja;
use crate::core::services::{CajaService, MovimientoRegistrado};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upstream::BearerToken;

pub async fn registrar(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    JsonBody(registro): JsonBody<RegistroCaja>,
) -> Response {
    into_response(registrar_movimiento(&state, &token, &registro).await)
}

pub async fn resumen(State(state): State<Arc<AppState>>, token: BearerToken) -> Response {
    into_response(CajaService::resumen(state.backend().await.as_ref(), &token).await)
}

async fn registrar_movimiento(
    state: &AppState,
    token: &BearerToken,
    registro: &RegistroCaja,
) -> AppResult<MovimientoRegistrado> {
    let body = serde_json::to_value(registro).map_err(|e| AppError::Validation(e.to_string()))?;
    let _ticket = state.guard.acquire(token, "/caja/registrar", &body)?;

    let hoy = chrono::Local::now().format("%Y-%m-%d").to_string();
    CajaService::registrar(state.backend().await.as_ref(), token, registro, &hoy).await
}
