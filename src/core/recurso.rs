//! Catálogo de colecciones del API remoto

use crate::core::models::{
    Cobro, Colaborador, Devolucion, Gasto, GestionPersonal, MovimientoCaja, PagoRealizado,
    Producto, Venta,
};
use crate::error::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recurso {
    Productos,
    Ventas,
    Devoluciones,
    Colaboradores,
    GestionPersonal,
    PagosRealizados,
    Gastos,
    Movimientos,
    Cobros,
}

impl Recurso {
    pub const TODOS: [Recurso; 9] = [
        Recurso::Productos,
        Recurso::Ventas,
        Recurso::Devoluciones,
        Recurso::Colaboradores,
        Recurso::GestionPersonal,
        Recurso::PagosRealizados,
        Recurso::Gastos,
        Recurso::Movimientos,
        Recurso::Cobros,
    ];

    /// Nombre en las rutas locales (`/api/recursos/:recurso`)
    pub fn nombre(&self) -> &'static str {
        match self {
            Recurso::Productos => "productos",
            Recurso::Ventas => "ventas",
            Recurso::Devoluciones => "devoluciones",
            Recurso::Colaboradores => "colaboradores",
            Recurso::GestionPersonal => "gestion-personal",
            Recurso::PagosRealizados => "pagos-realizados",
            Recurso::Gastos => "gastos",
            Recurso::Movimientos => "movimientos",
            Recurso::Cobros => "cobros",
        }
    }

    /// Ruta de la colección en el API remoto
    pub fn path(&self) -> &'static str {
        match self {
            Recurso::Productos => "/productos",
            Recurso::Ventas => "/ventas",
            Recurso::Devoluciones => "/ventas/devoluciones",
            Recurso::Colaboradores => "/colaboradores",
            Recurso::GestionPersonal => "/gestion-personal",
            Recurso::PagosRealizados => "/pagos-realizados",
            Recurso::Gastos => "/gastos",
            Recurso::Movimientos => "/caja/movimiento",
            Recurso::Cobros => "/cobros",
        }
    }

    /// Ruta de un elemento. Solo se aceptan identificadores simples.
    pub fn item_path(&self, id: &str) -> AppResult<String> {
        let valido = !id.is_empty()
            && id.len() <= 64
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valido {
            return Err(AppError::Validation(format!("Identificador inválido: {}", id)));
        }
        Ok(format!("{}/{}", self.path(), id))
    }

    /// Comprueba que el cuerpo de un formulario tenga la forma del registro
    pub fn validar(&self, body: &Value) -> AppResult<()> {
        if !body.is_object() {
            return Err(AppError::Validation("Se esperaba un objeto JSON".to_string()));
        }
        match self {
            Recurso::Productos => {
                let p: Producto = self.convertir(body)?;
                requerido(&p.nombre, "nombre")?;
                if p.precio_compra < 0.0 || p.precio_venta < 0.0 || p.cantidad < 0.0 {
                    return Err(AppError::Validation(
                        "Precios y cantidad no pueden ser negativos".to_string(),
                    ));
                }
            }
            Recurso::Ventas => {
                let v: Venta = self.convertir(body)?;
                if v.items.is_empty() && v.total <= 0.0 {
                    return Err(AppError::Validation(
                        "La venta debe tener productos o un total".to_string(),
                    ));
                }
            }
            Recurso::Devoluciones => {
                let d: Devolucion = self.convertir(body)?;
                if d.venta_id.is_none() {
                    return Err(AppError::Validation("Falta la venta de la devolución".to_string()));
                }
                positivo(d.cantidad, "cantidad")?;
            }
            Recurso::Colaboradores => {
                let c: Colaborador = self.convertir(body)?;
                requerido(&c.nombre, "nombre")?;
                if let Some(email) = c.email.as_deref().filter(|e| !e.is_empty()) {
                    if !email.contains('@') {
                        return Err(AppError::Validation(format!("Email inválido: {}", email)));
                    }
                }
            }
            Recurso::GestionPersonal => {
                let g: GestionPersonal = self.convertir(body)?;
                if g.colaborador_id.is_none() {
                    return Err(AppError::Validation("Falta el colaborador".to_string()));
                }
                positivo(g.monto, "monto")?;
            }
            Recurso::PagosRealizados => {
                let p: PagoRealizado = self.convertir(body)?;
                positivo(p.monto, "monto")?;
            }
            Recurso::Gastos => {
                let g: Gasto = self.convertir(body)?;
                requerido(&g.descripcion, "descripcion")?;
                positivo(g.total(), "costo")?;
            }
            Recurso::Movimientos => {
                let m: MovimientoCaja = self.convertir(body)?;
                positivo(m.monto, "monto")?;
            }
            Recurso::Cobros => {
                let c: Cobro = self.convertir(body)?;
                positivo(c.monto, "monto")?;
            }
        }
        Ok(())
    }

    fn convertir<T: DeserializeOwned>(&self, body: &Value) -> AppResult<T> {
        T::deserialize(body)
            .map_err(|e| AppError::Validation(format!("Datos inválidos para {}: {}", self, e)))
    }
}

fn requerido(valor: &str, campo: &str) -> AppResult<()> {
    if valor.trim().is_empty() {
        return Err(AppError::Validation(format!("El campo {} es obligatorio", campo)));
    }
    Ok(())
}

fn positivo(valor: f64, campo: &str) -> AppResult<()> {
    if !valor.is_finite() || valor <= 0.0 {
        return Err(AppError::Validation(format!("El campo {} debe ser mayor a cero", campo)));
    }
    Ok(())
}

impl fmt::Display for Recurso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nombre())
    }
}

impl FromStr for Recurso {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Recurso::TODOS
            .iter()
            .copied()
            .find(|r| r.nombre() == s)
            .ok_or_else(|| AppError::NotFound(format!("recurso {}", s)))
    }
}
