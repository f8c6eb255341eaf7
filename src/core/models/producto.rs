use super::{de_id, de_number};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    #[serde(default, alias = "_id", deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub nombre: String,
    #[serde(default, deserialize_with = "de_number")]
    pub precio_compra: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub precio_venta: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub cantidad: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub cantidad_vendida: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cantidad_restante: Option<f64>,
}

impl Producto {
    /// Unidades disponibles; el API no siempre envía `cantidadRestante`
    pub fn cantidad_disponible(&self) -> f64 {
        self.cantidad_restante
            .unwrap_or(self.cantidad - self.cantidad_vendida)
            .max(0.0)
    }

    pub fn margen_unitario(&self) -> f64 {
        self.precio_venta - self.precio_compra
    }
}
