use super::{de_id, de_number};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Gasto {
    #[serde(default, alias = "_id", deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default, alias = "costo", deserialize_with = "de_number")]
    pub costo_unitario: f64,
    #[serde(default = "cantidad_uno", deserialize_with = "de_number")]
    pub cantidad: f64,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
}

fn cantidad_uno() -> f64 {
    1.0
}

impl Gasto {
    pub fn total(&self) -> f64 {
        self.costo_unitario * self.cantidad
    }
}

/// Par (tipo, sección) de gasto derivado de una categoría de caja
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GastoDerivado {
    pub tipo: String,
    pub seccion: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_con_cantidad_por_defecto() {
        let gasto: Gasto = serde_json::from_value(serde_json::json!({
            "descripcion": "Bolsas",
            "costoUnitario": 2.5
        }))
        .unwrap();
        assert_eq!(gasto.total(), 2.5);
    }

    #[test]
    fn test_total() {
        let gasto: Gasto = serde_json::from_value(serde_json::json!({
            "descripcion": "Cajas",
            "costo": "3",
            "cantidad": 4
        }))
        .unwrap();
        assert_eq!(gasto.total(), 12.0);
    }
}
