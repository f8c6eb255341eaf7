use super::auth::BearerToken;
use super::backend::Backend;
use super::log_store::LogStore;
use crate::core::models::AppConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("gestion-server/", env!("CARGO_PKG_VERSION"));

/// Cliente HTTP del API de negocio
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    log_store: Arc<LogStore>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, log_store: Arc<LogStore>) -> Result<Self, String> {
        config.validate()?;
        let base_url = Url::parse(config.api_base_url.trim_end_matches('/'))
            .map_err(|e| format!("URL base inválida: {}", e))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.request_timeout_secs.min(10)))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| format!("No se pudo crear el cliente HTTP: {}", e))?;

        Ok(Self {
            http,
            base_url,
            log_store,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Une la URL base con una ruta relativa conservando el prefijo (`/api`)
    pub fn url(&self, path: &str) -> AppResult<Url> {
        let (ruta, query) = match path.split_once('?') {
            Some((ruta, query)) => (ruta, Some(query)),
            None => (path, None),
        };
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::Config("La URL base no admite rutas".to_string()))?;
            segments.pop_if_empty();
            for segment in ruta.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        url.set_query(query);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        token: &BearerToken,
        path: &str,
        body: Option<&Value>,
    ) -> AppResult<Value> {
        let url = self.url(path)?;
        let request_id = uuid::Uuid::new_v4().to_string();
        let start = Instant::now();

        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(token.as_str())
            .header("X-Request-Id", &request_id);
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = match request.send().await {
            Ok(response) => {
                let status = response.status();
                let text = response.text().await.map_err(|e| AppError::from_transport(&e));
                (status.as_u16(), text.and_then(|text| {
                    if status.is_success() {
                        parse_body(&text, path)
                    } else {
                        Err(AppError::from_status(status.as_u16(), &text, path))
                    }
                }))
            }
            Err(e) => (0, Err(AppError::from_transport(&e))),
        };

        let (status_code, outcome) = result;
        let latency_ms = start.elapsed().as_millis() as u64;
        let error = outcome.as_ref().err().map(|e| e.to_string());

        match &outcome {
            Ok(_) => debug!("{} {} -> {} ({}ms)", method, path, status_code, latency_ms),
            Err(e) if e.is_not_found() => {
                debug!("{} {} -> 404 ({}ms)", method, path, latency_ms)
            }
            Err(e) => warn!(
                "{} {} falló para {}: {} [{}]",
                method,
                path,
                token.fingerprint(),
                e,
                request_id
            ),
        }

        self.log_store.record(
            request_id,
            method.to_string(),
            path.to_string(),
            token.subject(),
            status_code,
            latency_ms,
            error,
        );

        outcome
    }
}

fn parse_body(text: &str, path: &str) -> AppResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| AppError::Decode(format!("{}: {}", path, e)))
}

#[async_trait]
impl Backend for ApiClient {
    async fn get(&self, token: &BearerToken, path: &str) -> AppResult<Value> {
        self.send(Method::GET, token, path, None).await
    }

    async fn post(&self, token: &BearerToken, path: &str, body: &Value) -> AppResult<Value> {
        self.send(Method::POST, token, path, Some(body)).await
    }

    async fn put(&self, token: &BearerToken, path: &str, body: &Value) -> AppResult<Value> {
        self.send(Method::PUT, token, path, Some(body)).await
    }

    async fn delete(&self, token: &BearerToken, path: &str) -> AppResult<()> {
        self.send(Method::DELETE, token, path, None).await.map(|_| ())
    }
}
