use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upstream::BearerToken;
use axum::{
    extract::{FromRequest, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Cabecera con la clave de administración
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Envoltorio de respuesta de la API
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

impl ApiResponse<()> {
    pub fn err(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            error: Some(message.into()),
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{} ({})", self, status);
        } else {
            tracing::warn!("{} ({})", self, status);
        }
        (status, ApiResponse::err(self.user_message())).into_response()
    }
}

// Manejo unificado de resultados
pub fn into_response<T: Serialize>(result: AppResult<T>) -> Response {
    match result {
        Ok(data) => ApiResponse::ok(data).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Token de la cabecera `Authorization`; los JWT vencidos se rechazan aquí
#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = BearerToken::parse(header)?;
        token.ensure_not_expired(chrono::Utc::now().timestamp())?;
        Ok(token)
    }
}

/// Cuerpo JSON; los errores de lectura salen con el mismo envoltorio que el resto
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::Validation(format!(
                "Datos inválidos: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// Rutas de administración: exige `X-Admin-Key`
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let permitido = state.verificar_admin(
        req.headers()
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    match permitido {
        Ok(()) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}

pub async fn request_logger(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = std::time::Instant::now();
    let response = next.run(req).await;
    let duration = start.elapsed();
    tracing::info!(
        "{} {} - status: {}, latency: {}ms",
        method,
        uri,
        response.status(),
        duration.as_millis()
    );
    response
}
