use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use super::common::into_response;
use crate::core::reports::{Rango, TipoReporte};
use crate::core::services::{Periodo, ReporteService};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upstream::BearerToken;

#[derive(Deserialize)]
pub struct ReporteQuery {
    pub rango: Option<String>,
    /// Día de referencia `YYYY-MM-DD`; hoy si falta
    pub fecha: Option<String>,
}

async fn periodo(state: &AppState, query: &ReporteQuery) -> AppResult<Periodo> {
    let rango = match query.rango.as_deref().filter(|r| !r.trim().is_empty()) {
        Some(rango) => rango.parse::<Rango>().map_err(AppError::Validation)?,
        None => state.config.read().await.default_rango,
    };
    let referencia = match query.fecha.as_deref().filter(|f| !f.trim().is_empty()) {
        Some(fecha) => Some(
            NaiveDate::parse_from_str(fecha.trim(), "%Y-%m-%d")
                .map_err(|_| AppError::Validation(format!("Fecha inválida: {}", fecha)))?,
        ),
        None => None,
    };
    Ok(Periodo::new(rango, referencia))
}

pub async fn serie(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Path(tipo): Path<String>,
    Query(query): Query<ReporteQuery>,
) -> Response {
    let result = async {
        let tipo: TipoReporte = tipo.parse().map_err(AppError::NotFound)?;
        let periodo = periodo(&state, &query).await?;
        ReporteService::serie(state.backend().await.as_ref(), &token, tipo, periodo).await
    };
    into_response(result.await)
}

pub async fn flujo(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Query(query): Query<ReporteQuery>,
) -> Response {
    let result = async {
        let periodo = periodo(&state, &query).await?;
        ReporteService::flujo(state.backend().await.as_ref(), &token, periodo).await
    };
    into_response(result.await)
}

pub async fn resumen(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Query(query): Query<ReporteQuery>,
) -> Response {
    let result = async {
        let periodo = periodo(&state, &query).await?;
        ReporteService::resumen(state.backend().await.as_ref(), &token, periodo).await
    };
    into_response(result.await)
}

pub async fn inventario(State(state): State<Arc<AppState>>, token: BearerToken) -> Response {
    into_response(ReporteService::inventario(state.backend().await.as_ref(), &token).await)
}
