//! Tipos de error
//! Errores de la capa HTTP: tanto los del API remoto como las validaciones locales.

use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de red: {0}")]
    Network(String),

    #[error("Tiempo de espera agotado")]
    Timeout,

    #[error("No autorizado")]
    Unauthorized,

    #[error("Acceso restringido a administración")]
    Forbidden,

    #[error("Recurso no encontrado: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Solicitud duplicada en curso")]
    Duplicate,

    #[error("Error del servidor ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    #[error("Error de configuración: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Clasifica un error de transporte de reqwest
    pub fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            AppError::Timeout
        } else if error.is_decode() {
            AppError::Decode(error.to_string())
        } else if error.is_connect() || error.is_request() || error.is_body() {
            AppError::Network(error.to_string())
        } else {
            AppError::Network(format!("Error desconocido: {}", error))
        }
    }

    /// Traduce un estado HTTP no exitoso del API remoto.
    /// `body` es el cuerpo crudo; si es JSON se extrae `message` o `error`.
    pub fn from_status(status: u16, body: &str, resource: &str) -> Self {
        match status {
            401 | 403 => AppError::Unauthorized,
            404 => AppError::NotFound(resource.to_string()),
            400 | 422 => AppError::Validation(
                extract_message(body).unwrap_or_else(|| "Datos inválidos".to_string()),
            ),
            409 => AppError::Validation(
                extract_message(body).unwrap_or_else(|| "Conflicto con el estado actual".to_string()),
            ),
            _ => AppError::Upstream {
                status,
                message: extract_message(body).unwrap_or_else(|| "Error del servidor".to_string()),
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Network(_) | AppError::Upstream { .. } | AppError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate => StatusCode::CONFLICT,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensaje mostrado en línea al usuario. Los 5xx nunca filtran detalles.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "No se pudo conectar con el servidor".to_string(),
            AppError::Upstream { .. } | AppError::Decode(_) => {
                "Ocurrió un error en el servidor, intente nuevamente".to_string()
            }
            AppError::Config(_) => "Error interno del servidor".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl From<String> for AppError {
    fn from(message: String) -> Self {
        AppError::Config(message)
    }
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => ["message", "error", "mensaje"]
            .iter()
            .find_map(|key| match value.get(*key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Array(items)) => {
                    let joined = items
                        .iter()
                        .filter_map(|v| v.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    (!joined.is_empty()).then_some(joined)
                }
                _ => None,
            }),
        Err(_) if trimmed.len() <= 200 && !trimmed.starts_with('<') => Some(trimmed.to_string()),
        Err(_) => None,
    }
}
