use crate::core::categoria::{construir_movimiento, RegistroCaja};
use crate::core::models::{NuevoMovimientoCaja, ResumenCaja};
use crate::core::recurso::Recurso;
use crate::error::{AppError, AppResult};
use crate::upstream::{Backend, BearerToken};
use serde::Serialize;
use serde_json::Value;

const RESUMEN_PATH: &str = "/caja/resumen";

#[derive(Debug, Clone, Serialize)]
pub struct MovimientoRegistrado {
    pub movimiento: NuevoMovimientoCaja,
    /// Lo que devolvió el API (incluye gastos o pagos que haya generado)
    pub respuesta: Value,
}

pub struct CajaService;

impl CajaService {
    /// Clasifica la categoría y envía un único `POST /caja/movimiento`.
    /// Los registros de gasto o pago asociados los crea el API remoto.
    pub async fn registrar(
        backend: &dyn Backend,
        token: &BearerToken,
        registro: &RegistroCaja,
        hoy: &str,
    ) -> AppResult<MovimientoRegistrado> {
        let movimiento = construir_movimiento(registro, hoy)?;
        let body = serde_json::to_value(&movimiento)
            .map_err(|e| AppError::Decode(format!("movimiento: {}", e)))?;

        let respuesta = backend.post(token, Recurso::Movimientos.path(), &body).await?;
        tracing::info!(
            "Movimiento {:?}/{} de {} registrado por {}",
            movimiento.tipo,
            movimiento.categoria,
            movimiento.monto,
            token.subject()
        );

        Ok(MovimientoRegistrado {
            movimiento,
            respuesta,
        })
    }

    pub async fn resumen(backend: &dyn Backend, token: &BearerToken) -> AppResult<ResumenCaja> {
        let value = backend.get(token, RESUMEN_PATH).await?;
        let value = match value {
            Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or_default(),
            other => other,
        };
        let mut resumen: ResumenCaja = serde_json::from_value(value)
            .map_err(|e| AppError::Decode(format!("{}: {}", RESUMEN_PATH, e)))?;

        // algunas versiones del API no envían el saldo
        if resumen.saldo.is_none() {
            resumen.saldo = Some(resumen.ingresos - resumen.egresos);
        }
        Ok(resumen)
    }
}
