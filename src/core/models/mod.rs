//! Modelos de datos
//! Registros que se intercambian con el API remoto (JSON, claves camelCase)

mod caja;
mod chatbot;
mod colaborador;
mod config;
mod gasto;
mod producto;
mod venta;

pub use caja::{Cobro, MovimientoCaja, NuevoMovimientoCaja, ResumenCaja, TipoMovimiento};
pub use chatbot::{ChatbotPregunta, ChatbotRespuesta};
pub use colaborador::{Colaborador, GestionPersonal, PagoRealizado, TipoRegistroPersonal};
pub use config::AppConfig;
pub use gasto::{Gasto, GastoDerivado};
pub use producto::Producto;
pub use venta::{Devolucion, EstadoPago, Venta, VentaItem};

use serde::{Deserialize, Deserializer};

/// Registro identificable por su clave en el API remoto
pub trait Identificado {
    fn id(&self) -> Option<String>;
}

/// Acepta identificadores como texto o número (`"12"`, `12`)
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
        // referencia poblada: `{"_id": "...", "nombre": "..."}`
        Ref(serde_json::Value),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) if !s.is_empty() => Some(s),
        Some(RawId::Text(_)) | None => None,
        Some(RawId::Int(n)) => Some(n.to_string()),
        Some(RawId::Float(n)) => Some(n.to_string()),
        Some(RawId::Ref(value)) => value.id(),
    })
}

/// Números que el API a veces envía como texto (`"12.50"`)
pub(crate) fn de_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Num(f64),
        Text(String),
    }

    match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Num(n)) => Ok(n),
        Some(RawNumber::Text(s)) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        None => Ok(0.0),
    }
}

/// Como `de_number`, pero distingue el campo ausente del cero
pub(crate) fn de_number_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Num(f64),
        Text(String),
    }

    match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Num(n)) => Ok(Some(n)),
        Some(RawNumber::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawNumber::Text(s)) => s.trim().parse::<f64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

macro_rules! impl_identificado {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identificado for $ty {
                fn id(&self) -> Option<String> {
                    self.id.clone()
                }
            }
        )*
    };
}

impl_identificado!(
    Producto,
    Venta,
    Devolucion,
    Colaborador,
    GestionPersonal,
    PagoRealizado,
    Gasto,
    MovimientoCaja,
    Cobro,
);

impl Identificado for serde_json::Value {
    fn id(&self) -> Option<String> {
        match self.get("id").or_else(|| self.get("_id"))? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
