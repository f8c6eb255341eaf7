//! Configuración de la aplicación

use crate::core::reports::Rango;
use serde::{Deserialize, Serialize};

/// Configuración persistida del servidor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub log_capacity: usize, // entradas del registro de llamadas
    pub default_rango: Rango,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            api_base_url: "http://localhost:4000/api".to_string(),
            request_timeout_secs: 30,
            log_capacity: 500,
            default_rango: Rango::Mes,
        }
    }

    /// Valida la URL base antes de guardar
    pub fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.api_base_url)
            .map_err(|e| format!("URL base inválida '{}': {}", self.api_base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("Esquema no soportado: {}", url.scheme()));
        }
        if self.request_timeout_secs == 0 {
            return Err("El tiempo de espera debe ser mayor a cero".to_string());
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
