//! Interfaz con el API remoto

use super::auth::BearerToken;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Operaciones REST contra el API remoto. `path` es relativo a la URL base
/// (`/productos`, `/ventas/12`).
#[async_trait]
pub trait Backend: Send + Sync {
    async fn get(&self, token: &BearerToken, path: &str) -> AppResult<Value>;

    async fn post(&self, token: &BearerToken, path: &str, body: &Value) -> AppResult<Value>;

    async fn put(&self, token: &BearerToken, path: &str, body: &Value) -> AppResult<Value>;

    async fn delete(&self, token: &BearerToken, path: &str) -> AppResult<()>;
}

/// El API responde listas sueltas o envueltas (`{"data": [...]}`)
pub fn extraer_lista(value: Value) -> AppResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        Value::Object(mut map) => {
            for key in ["data", "items", "results", "resultados"] {
                match map.remove(key) {
                    Some(Value::Array(items)) => return Ok(items),
                    Some(Value::Object(inner)) => return extraer_lista(Value::Object(inner)),
                    _ => {}
                }
            }
            let mut arrays = map.into_iter().filter_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            });
            match (arrays.next(), arrays.next()) {
                (Some(items), None) => Ok(items),
                _ => Err(AppError::Decode("Se esperaba una lista".to_string())),
            }
        }
        _ => Err(AppError::Decode("Se esperaba una lista".to_string())),
    }
}

/// GET de una lista y conversión a registros tipados. Un registro mal formado
/// se descarta con un aviso; el resto de la lista se conserva.
pub async fn fetch_lista<T: DeserializeOwned>(
    backend: &dyn Backend,
    token: &BearerToken,
    path: &str,
) -> AppResult<Vec<T>> {
    let items = extraer_lista(backend.get(token, path).await?)?;
    Ok(decodificar_lista(path, items))
}

pub(crate) fn decodificar_lista<T: DeserializeOwned>(path: &str, items: Vec<Value>) -> Vec<T> {
    let total = items.len();
    let registros: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(registro) => Some(registro),
            Err(e) => {
                tracing::warn!("{}: registro {} descartado: {}", path, i, e);
                None
            }
        })
        .collect();
    if registros.len() < total {
        tracing::warn!("{}: {} de {} registros descartados", path, total - registros.len(), total);
    }
    registros
}
