use axum::{
    extract::{Path, State},
    response::Response,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::common::{into_response, JsonBody};
use crate::core::lista::{Eliminacion, ListaLocal};
use crate::core::recurso::Recurso;
use crate::error::AppResult;
use crate::state::AppState;
use crate::upstream::BearerToken;

#[derive(Serialize)]
pub struct Creado {
    pub creado: Value,
    pub lista: Vec<Value>,
}

#[derive(Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<String>,
}

#[derive(Serialize)]
pub struct EliminacionMultiple {
    pub eliminados: Vec<Eliminacion>,
    pub lista: Vec<Value>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Path(recurso): Path<String>,
) -> Response {
    into_response(listar(&state, &token, &recurso).await)
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Path(recurso): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Response {
    into_response(crear(&state, &token, &recurso, &body).await)
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Path((recurso, id)): Path<(String, String)>,
) -> Response {
    into_response(detalle(&state, &token, &recurso, &id).await)
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Path((recurso, id)): Path<(String, String)>,
    JsonBody(body): JsonBody<Value>,
) -> Response {
    into_response(actualizar(&state, &token, &recurso, &id, &body).await)
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Path((recurso, id)): Path<(String, String)>,
) -> Response {
    into_response(eliminar(&state, &token, &recurso, &id).await)
}

pub async fn batch_delete(
    State(state): State<Arc<AppState>>,
    token: BearerToken,
    Path(recurso): Path<String>,
    JsonBody(req): JsonBody<BatchDeleteRequest>,
) -> Response {
    into_response(eliminar_varios(&state, &token, &recurso, &req.ids).await)
}

async fn listar(state: &AppState, token: &BearerToken, recurso: &str) -> AppResult<Vec<Value>> {
    let mut lista = ListaLocal::<Value>::new(recurso.parse()?);
    lista.cargar(state.backend().await.as_ref(), token).await?;
    Ok(lista.into_items())
}

async fn crear(
    state: &AppState,
    token: &BearerToken,
    recurso: &str,
    body: &Value,
) -> AppResult<Creado> {
    let recurso: Recurso = recurso.parse()?;
    let _ticket = state.guard.acquire(token, recurso.path(), body)?;

    let mut lista = ListaLocal::<Value>::new(recurso);
    let creado = lista.crear(state.backend().await.as_ref(), token, body).await?;
    Ok(Creado {
        creado,
        lista: lista.into_items(),
    })
}

async fn detalle(state: &AppState, token: &BearerToken, recurso: &str, id: &str) -> AppResult<Value> {
    let recurso: Recurso = recurso.parse()?;
    state.backend().await.get(token, &recurso.item_path(id)?).await
}

async fn actualizar(
    state: &AppState,
    token: &BearerToken,
    recurso: &str,
    id: &str,
    body: &Value,
) -> AppResult<Value> {
    let recurso: Recurso = recurso.parse()?;
    let _ticket = state.guard.acquire(token, &recurso.item_path(id)?, body)?;

    let mut lista = ListaLocal::<Value>::new(recurso);
    lista.actualizar(state.backend().await.as_ref(), token, id, body).await
}

async fn eliminar(
    state: &AppState,
    token: &BearerToken,
    recurso: &str,
    id: &str,
) -> AppResult<Eliminacion> {
    let mut lista = ListaLocal::<Value>::new(recurso.parse()?);
    lista.eliminar(state.backend().await.as_ref(), token, id).await
}

async fn eliminar_varios(
    state: &AppState,
    token: &BearerToken,
    recurso: &str,
    ids: &[String],
) -> AppResult<EliminacionMultiple> {
    let backend = state.backend().await;
    let mut lista = ListaLocal::<Value>::new(recurso.parse()?);
    lista.cargar(backend.as_ref(), token).await?;
    let eliminados = lista.eliminar_varios(backend.as_ref(), token, ids).await?;
    Ok(EliminacionMultiple {
        eliminados,
        lista: lista.into_items(),
    })
}
