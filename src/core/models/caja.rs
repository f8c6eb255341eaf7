use super::{de_id, de_number, de_number_opt, GastoDerivado};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TipoMovimiento {
    #[serde(alias = "Ingreso", alias = "INGRESO")]
    Ingreso,
    #[serde(alias = "Egreso", alias = "EGRESO")]
    Egreso,
}

/// Movimiento del libro de caja
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovimientoCaja {
    #[serde(default, alias = "_id", deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tipo: TipoMovimiento,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default, deserialize_with = "de_number")]
    pub monto: f64,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
}

/// Cuerpo de `POST /caja/movimiento`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NuevoMovimientoCaja {
    pub tipo: TipoMovimiento,
    pub categoria: String,
    pub monto: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub fecha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gasto: Option<GastoDerivado>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colaborador_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResumenCaja {
    #[serde(default, deserialize_with = "de_number")]
    pub ingresos: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub egresos: f64,
    /// `None` cuando el API no lo envía
    #[serde(default, deserialize_with = "de_number_opt")]
    pub saldo: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cobro {
    #[serde(default, alias = "_id", deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "venta", deserialize_with = "de_id")]
    pub venta_id: Option<String>,
    #[serde(default, deserialize_with = "de_number")]
    pub monto: f64,
    #[serde(default)]
    pub metodo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
}
