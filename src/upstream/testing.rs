//! Backend falso para pruebas: respuestas fijas y registro de llamadas

use super::auth::BearerToken;
use super::backend::Backend;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone)]
pub enum Respuesta {
    Ok(Value),
    Status(u16, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Llamada {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeBackend {
    respuestas: Mutex<HashMap<(String, String), Respuesta>>,
    llamadas: Mutex<Vec<Llamada>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn responder(&self, method: &str, path: &str, respuesta: Respuesta) -> &Self {
        self.respuestas
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), respuesta);
        self
    }

    pub fn ok(&self, method: &str, path: &str, value: Value) -> &Self {
        self.responder(method, path, Respuesta::Ok(value))
    }

    pub fn llamadas(&self) -> Vec<Llamada> {
        self.llamadas.lock().unwrap().clone()
    }

    pub fn contar(&self, method: &str, path: &str) -> usize {
        self.llamadas()
            .iter()
            .filter(|l| l.method == method && l.path == path)
            .count()
    }

    fn atender(&self, method: &'static str, path: &str, body: Option<&Value>) -> AppResult<Value> {
        self.llamadas.lock().unwrap().push(Llamada {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        let respuesta = self
            .respuestas
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned();
        match respuesta {
            Some(Respuesta::Ok(value)) => Ok(value),
            Some(Respuesta::Status(status, body)) => Err(AppError::from_status(status, &body, path)),
            None => Err(AppError::from_status(404, "", path)),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn get(&self, _token: &BearerToken, path: &str) -> AppResult<Value> {
        self.atender("GET", path, None)
    }

    async fn post(&self, _token: &BearerToken, path: &str, body: &Value) -> AppResult<Value> {
        self.atender("POST", path, Some(body))
    }

    async fn put(&self, _token: &BearerToken, path: &str, body: &Value) -> AppResult<Value> {
        self.atender("PUT", path, Some(body))
    }

    async fn delete(&self, _token: &BearerToken, path: &str) -> AppResult<()> {
        self.atender("DELETE", path, None).map(|_| ())
    }
}
