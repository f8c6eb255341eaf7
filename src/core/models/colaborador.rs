use super::{de_id, de_number};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Colaborador {
    #[serde(default, alias = "_id", deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub nombre: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub departamento: Option<String>,
    #[serde(default, deserialize_with = "de_number")]
    pub salario: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TipoRegistroPersonal {
    #[serde(alias = "Trabajo", alias = "TRABAJO")]
    Trabajo,
    #[serde(alias = "Adelanto", alias = "ADELANTO")]
    Adelanto,
    #[serde(alias = "Faltante", alias = "FALTANTE")]
    Faltante,
}

/// Registro de gestión personal: trabajo, adelanto o faltante de un colaborador
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GestionPersonal {
    #[serde(default, alias = "_id", deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "colaborador", deserialize_with = "de_id")]
    pub colaborador_id: Option<String>,
    pub tipo: TipoRegistroPersonal,
    #[serde(default, deserialize_with = "de_number")]
    pub monto: f64,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagoRealizado {
    #[serde(default, alias = "_id", deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "colaborador", deserialize_with = "de_id")]
    pub colaborador_id: Option<String>,
    #[serde(default, deserialize_with = "de_number")]
    pub monto: f64,
    #[serde(default)]
    pub metodo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
}
