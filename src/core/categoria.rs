//! Categorías de caja
//! Una categoría escrita por el usuario se traduce al tipo de movimiento, la categoría
//! de caja y, para egresos, el par (tipo, sección) del gasto que registra el API.

use crate::core::models::{GastoDerivado, NuevoMovimientoCaja, TipoMovimiento};
use crate::error::{AppError, AppResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

struct Regla {
    patron: Regex,
    tipo: TipoMovimiento,
    categoria: &'static str,
    gasto: Option<(&'static str, &'static str)>,
}

fn regla(
    patron: &str,
    tipo: TipoMovimiento,
    categoria: &'static str,
    gasto: Option<(&'static str, &'static str)>,
) -> Option<Regla> {
    match Regex::new(patron) {
        Ok(patron) => Some(Regla {
            patron,
            tipo,
            categoria,
            gasto,
        }),
        Err(e) => {
            tracing::error!("Patrón de categoría inválido {}: {}", categoria, e);
            None
        }
    }
}

// En orden de prioridad; el texto ya llega en minúsculas y sin acentos
static REGLAS: Lazy<Vec<Regla>> = Lazy::new(|| {
    use TipoMovimiento::{Egreso, Ingreso};
    [
        regla(
            r"\b(sueldos?|salarios?|nominas?|pago\s+(de\s+|al\s+)?personal|adelantos?|anticipos?|bonos?|bonificacion)\b",
            Egreso,
            "pago_personal",
            Some(("personal", "gestion-personal")),
        ),
        regla(
            r"\b(compras?|mercaderias?|inventario|proveedor(es)?|stock)\b",
            Egreso,
            "compra_inventario",
            Some(("compra", "inventario")),
        ),
        regla(
            r"\b(impuestos?|tributos?|iva)\b",
            Egreso,
            "impuestos",
            Some(("fijo", "impuestos")),
        ),
        regla(
            r"\b(alquiler|renta|luz|agua|internet|telefono|servicios?)\b",
            Egreso,
            "servicios",
            Some(("fijo", "servicios")),
        ),
        regla(r"\b(ventas?|cobros?)\b", Ingreso, "venta", None),
        regla(
            r"\b(ingresos?|abonos?|depositos?|aportes?)\b",
            Ingreso,
            "otro_ingreso",
            None,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
});

/// Resultado de clasificar una categoría
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clasificacion {
    pub tipo: TipoMovimiento,
    pub categoria: String,
    pub gasto: Option<GastoDerivado>,
}

/// Solicitud del formulario de caja
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroCaja {
    pub categoria: String,
    #[serde(deserialize_with = "crate::core::models::de_number")]
    pub monto: f64,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub colaborador_id: Option<String>,
}

fn normalizar(texto: &str) -> String {
    texto
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            '_' | '-' => ' ',
            other => other,
        })
        .collect()
}

pub fn clasificar(categoria: &str) -> Clasificacion {
    let texto = normalizar(categoria);
    let (tipo, categoria, gasto) = REGLAS
        .iter()
        .find(|r| r.patron.is_match(&texto))
        .map(|r| (r.tipo, r.categoria, r.gasto))
        .unwrap_or((TipoMovimiento::Egreso, "otros_gastos", Some(("variable", "otros"))));

    Clasificacion {
        tipo,
        categoria: categoria.to_string(),
        gasto: gasto.map(|(tipo, seccion)| GastoDerivado {
            tipo: tipo.to_string(),
            seccion: seccion.to_string(),
        }),
    }
}

/// Arma el cuerpo de `POST /caja/movimiento`.
/// `hoy` se usa cuando el formulario no trae fecha.
pub fn construir_movimiento(registro: &RegistroCaja, hoy: &str) -> AppResult<NuevoMovimientoCaja> {
    let categoria = registro.categoria.trim();
    if categoria.is_empty() {
        return Err(AppError::Validation("La categoría es obligatoria".to_string()));
    }
    if !registro.monto.is_finite() || registro.monto <= 0.0 {
        return Err(AppError::Validation("El monto debe ser mayor a cero".to_string()));
    }

    let clasificacion = clasificar(categoria);
    let descripcion = registro
        .descripcion
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| Some(categoria.to_string()));
    let fecha = registro
        .fecha
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(hoy)
        .to_string();

    Ok(NuevoMovimientoCaja {
        tipo: clasificacion.tipo,
        categoria: clasificacion.categoria,
        monto: registro.monto,
        descripcion,
        fecha,
        gasto: clasificacion.gasto,
        colaborador_id: registro.colaborador_id.clone().filter(|s| !s.is_empty()),
    })
}
