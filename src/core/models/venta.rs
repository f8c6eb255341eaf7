use super::{de_id, de_number};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EstadoPago {
    Pagado,
    #[default]
    Pendiente,
    Parcial,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VentaItem {
    #[serde(default, alias = "producto", deserialize_with = "de_id")]
    pub producto_id: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "de_number")]
    pub cantidad: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub precio_unitario: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
}

impl VentaItem {
    pub fn importe(&self) -> f64 {
        self.subtotal.unwrap_or(self.cantidad * self.precio_unitario)
    }
}

/// Venta con sus líneas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Venta {
    #[serde(default, alias = "_id", deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "colaborador", deserialize_with = "de_id")]
    pub colaborador_id: Option<String>,
    #[serde(default, alias = "productos")]
    pub items: Vec<VentaItem>,
    #[serde(default, alias = "monto", deserialize_with = "de_number")]
    pub total: f64,
    #[serde(default)]
    pub estado_pago: EstadoPago,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
}

impl Venta {
    /// Total declarado o, si viene en cero, la suma de sus líneas
    pub fn total_efectivo(&self) -> f64 {
        if self.total != 0.0 {
            self.total
        } else {
            self.items.iter().map(VentaItem::importe).sum()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Devolucion {
    #[serde(default, alias = "_id", deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "venta", deserialize_with = "de_id")]
    pub venta_id: Option<String>,
    #[serde(default, alias = "producto", deserialize_with = "de_id")]
    pub producto_id: Option<String>,
    #[serde(default, deserialize_with = "de_number")]
    pub cantidad: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub monto: f64,
    #[serde(default)]
    pub motivo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
}
