//! Bloqueo de envíos duplicados
//! Un mismo usuario no puede repetir el mismo envío mientras el primero sigue en curso.

use super::auth::BearerToken;
use crate::error::{AppError, AppResult};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::{Duration, Instant};

// Un envío colgado más de esto ya no bloquea
const STALE_AFTER: Duration = Duration::from_secs(120);

#[derive(Clone, Default)]
pub struct SubmissionGuard {
    inflight: Arc<DashMap<String, Instant>>,
}

/// Se libera al soltarse
pub struct Ticket {
    key: String,
    inflight: Arc<DashMap<String, Instant>>,
}

impl Drop for Ticket {
    fn drop(&mut self) {
        self.inflight.remove(&self.key);
    }
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(token: &BearerToken, ruta: &str, body: &Value) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(ruta.as_bytes());
        hasher.update([0u8]);
        hasher.update(body.to_string().as_bytes());
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    pub fn acquire(&self, token: &BearerToken, ruta: &str, body: &Value) -> AppResult<Ticket> {
        let key = Self::key(token, ruta, body);
        match self.inflight.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                if entry.get().elapsed() < STALE_AFTER {
                    tracing::warn!("Envío duplicado de {} a {}", token.fingerprint(), ruta);
                    return Err(AppError::Duplicate);
                }
                entry.insert(Instant::now());
            }
            Entry::Vacant(entry) => {
                entry.insert(Instant::now());
            }
        }
        Ok(Ticket {
            key,
            inflight: self.inflight.clone(),
        })
    }

    pub fn in_flight(&self) -> usize {
        self.inflight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rechaza_duplicado_en_curso() {
        let guard = SubmissionGuard::new();
        let token = BearerToken::parse("tok").unwrap();
        let body = json!({ "nombre": "Arroz" });

        let ticket = guard.acquire(&token, "/productos", &body).unwrap();
        assert!(matches!(
            guard.acquire(&token, "/productos", &body),
            Err(AppError::Duplicate)
        ));
        drop(ticket);
        assert_eq!(guard.in_flight(), 0);
        assert!(guard.acquire(&token, "/productos", &body).is_ok());
    }

    #[test]
    fn test_cuerpos_distintos_no_chocan() {
        let guard = SubmissionGuard::new();
        let token = BearerToken::parse("tok").unwrap();
        let _a = guard.acquire(&token, "/gastos", &json!({ "monto": 1 })).unwrap();
        let _b = guard.acquire(&token, "/gastos", &json!({ "monto": 2 })).unwrap();
        let otro = BearerToken::parse("otro").unwrap();
        let _c = guard.acquire(&otro, "/gastos", &json!({ "monto": 1 })).unwrap();
        assert_eq!(guard.in_flight(), 3);
    }
}
