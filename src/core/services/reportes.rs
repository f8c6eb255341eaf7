use crate::core::models::{
    Cobro, Devolucion, Gasto, MovimientoCaja, PagoRealizado, Producto, TipoMovimiento, Venta,
};
use crate::core::recurso::Recurso;
use crate::core::reports::{
    self, agrupar, monto_si, DatosResumen, Flujo, Rango, ResumenPeriodo, Serie, TipoReporte,
    ValorInventario,
};
use crate::error::AppResult;
use crate::upstream::{fetch_lista, Backend, BearerToken};
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Rango, día de referencia y el "ahora" usado para fechas inválidas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Periodo {
    pub rango: Rango,
    pub referencia: NaiveDate,
    pub ahora: NaiveDateTime,
}

impl Periodo {
    pub fn new(rango: Rango, referencia: Option<NaiveDate>) -> Self {
        let ahora = Local::now().naive_local();
        Self {
            rango,
            referencia: referencia.unwrap_or(ahora.date()),
            ahora,
        }
    }
}

pub struct ReporteService;

impl ReporteService {
    pub async fn serie(
        backend: &dyn Backend,
        token: &BearerToken,
        tipo: TipoReporte,
        periodo: Periodo,
    ) -> AppResult<Serie> {
        let Periodo {
            rango,
            referencia,
            ahora,
        } = periodo;

        let serie = match tipo {
            TipoReporte::Ventas => {
                let ventas: Vec<Venta> = fetch_lista(backend, token, Recurso::Ventas.path()).await?;
                agrupar(&ventas, rango, referencia, ahora, Venta::total_efectivo)
            }
            TipoReporte::Gastos => {
                let gastos: Vec<Gasto> = fetch_lista(backend, token, Recurso::Gastos.path()).await?;
                agrupar(&gastos, rango, referencia, ahora, Gasto::total)
            }
            TipoReporte::Ingresos | TipoReporte::Egresos => {
                let movimientos: Vec<MovimientoCaja> =
                    fetch_lista(backend, token, Recurso::Movimientos.path()).await?;
                let tipo_mov = if tipo == TipoReporte::Ingresos {
                    TipoMovimiento::Ingreso
                } else {
                    TipoMovimiento::Egreso
                };
                agrupar(&movimientos, rango, referencia, ahora, monto_si(tipo_mov))
            }
            TipoReporte::Devoluciones => {
                let devoluciones: Vec<Devolucion> =
                    fetch_lista(backend, token, Recurso::Devoluciones.path()).await?;
                agrupar(&devoluciones, rango, referencia, ahora, |d| d.monto)
            }
            TipoReporte::Pagos => {
                let pagos: Vec<PagoRealizado> =
                    fetch_lista(backend, token, Recurso::PagosRealizados.path()).await?;
                agrupar(&pagos, rango, referencia, ahora, |p| p.monto)
            }
            TipoReporte::Cobros => {
                let cobros: Vec<Cobro> = fetch_lista(backend, token, Recurso::Cobros.path()).await?;
                agrupar(&cobros, rango, referencia, ahora, |c| c.monto)
            }
        };

        tracing::debug!(
            "Reporte {} ({}) con {} intervalos, total {}",
            tipo,
            rango,
            serie.etiquetas.len(),
            serie.total
        );
        Ok(serie)
    }

    pub async fn flujo(
        backend: &dyn Backend,
        token: &BearerToken,
        periodo: Periodo,
    ) -> AppResult<Flujo> {
        let movimientos: Vec<MovimientoCaja> =
            fetch_lista(backend, token, Recurso::Movimientos.path()).await?;
        Ok(reports::flujo(
            &movimientos,
            periodo.rango,
            periodo.referencia,
            periodo.ahora,
        ))
    }

    /// Totales del período; las cuatro listas se piden en paralelo
    pub async fn resumen(
        backend: &dyn Backend,
        token: &BearerToken,
        periodo: Periodo,
    ) -> AppResult<ResumenPeriodo> {
        let (ventas, gastos, devoluciones, movimientos) = futures::try_join!(
            fetch_lista::<Venta>(backend, token, Recurso::Ventas.path()),
            fetch_lista::<Gasto>(backend, token, Recurso::Gastos.path()),
            fetch_lista::<Devolucion>(backend, token, Recurso::Devoluciones.path()),
            fetch_lista::<MovimientoCaja>(backend, token, Recurso::Movimientos.path()),
        )?;

        Ok(reports::resumen(
            DatosResumen {
                ventas: &ventas,
                gastos: &gastos,
                devoluciones: &devoluciones,
                movimientos: &movimientos,
            },
            periodo.rango,
            periodo.referencia,
            periodo.ahora,
        ))
    }

    pub async fn inventario(
        backend: &dyn Backend,
        token: &BearerToken,
    ) -> AppResult<ValorInventario> {
        let productos: Vec<Producto> =
            fetch_lista(backend, token, Recurso::Productos.path()).await?;
        Ok(reports::inventario(&productos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::upstream::testing::{FakeBackend, Respuesta};
    use serde_json::json;

    fn token() -> BearerToken {
        BearerToken::parse("t").unwrap()
    }

    fn enero() -> Periodo {
        let referencia = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        Periodo {
            rango: Rango::Mes,
            referencia,
            ahora: referencia.and_hms_opt(9, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_serie_ventas_enero() {
        let backend = FakeBackend::new();
        backend.ok(
            "GET",
            "/ventas",
            json!({ "data": [
                { "_id": "v1", "total": 100, "fecha": "2024-01-01" },
                { "_id": "v2", "total": 50, "fecha": "2024-01-15" },
                { "_id": "v3", "total": 75, "fecha": "2024-02-01" }
            ]}),
        );

        let serie = ReporteService::serie(&backend, &token(), TipoReporte::Ventas, enero())
            .await
            .unwrap();
        assert_eq!(serie.etiquetas.len(), 31);
        assert_eq!(serie.valores[0], 100.0);
        assert_eq!(serie.valores[14], 50.0);
        assert_eq!(serie.total, 150.0);
    }

    #[tokio::test]
    async fn test_serie_egresos_usa_movimientos() {
        let backend = FakeBackend::new();
        backend.ok(
            "GET",
            "/caja/movimiento",
            json!([
                { "tipo": "egreso", "monto": 30, "fecha": "2024-01-03" },
                { "tipo": "ingreso", "monto": 90, "fecha": "2024-01-03" }
            ]),
        );
        let serie = ReporteService::serie(&backend, &token(), TipoReporte::Egresos, enero())
            .await
            .unwrap();
        assert_eq!(serie.total, 30.0);
    }

    #[tokio::test]
    async fn test_resumen_pide_cada_lista_una_vez() {
        let backend = FakeBackend::new();
        backend
            .ok("GET", "/ventas", json!([{ "total": 10, "fecha": "2024-01-02" }]))
            .ok("GET", "/gastos", json!([]))
            .ok("GET", "/ventas/devoluciones", json!([]))
            .ok("GET", "/caja/movimiento", json!([{ "tipo": "ingreso", "monto": 10, "fecha": "2024-01-02" }]));

        let r = ReporteService::resumen(&backend, &token(), enero()).await.unwrap();
        assert_eq!(r.ventas, 10.0);
        assert_eq!(r.balance, 10.0);
        for path in ["/ventas", "/gastos", "/ventas/devoluciones", "/caja/movimiento"] {
            assert_eq!(backend.contar("GET", path), 1, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_resumen_propaga_no_autorizado() {
        let backend = FakeBackend::new();
        backend
            .ok("GET", "/ventas", json!([]))
            .responder("GET", "/gastos", Respuesta::Status(401, String::new()))
            .ok("GET", "/ventas/devoluciones", json!([]))
            .ok("GET", "/caja/movimiento", json!([]));

        let err = ReporteService::resumen(&backend, &token(), enero()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_producto_mal_formado_se_descarta() {
        let backend = FakeBackend::new();
        backend.ok(
            "GET",
            "/productos",
            json!([
                { "precioVenta": 3 },
                { "_id": "p1", "nombre": "Pan", "cantidad": 2, "precioCompra": 1, "precioVenta": 2 }
            ]),
        );
        let valor = ReporteService::inventario(&backend, &token()).await.unwrap();
        assert_eq!(valor.productos, 1);
        assert_eq!(valor.valor_venta, 4.0);
    }

    #[tokio::test]
    async fn test_resumen_tolera_un_gasto_incompleto() {
        let backend = FakeBackend::new();
        backend
            .ok("GET", "/ventas", json!([]))
            .ok(
                "GET",
                "/gastos",
                json!([
                    { "descripcion": "Luz", "costoUnitario": 20, "fecha": "2024-01-05" },
                    { "descripcion": "Agua", "costoUnitario": "sin dato", "fecha": "2024-01-05" },
                    { "costoUnitario": 5, "fecha": "2024-01-06" }
                ]),
            )
            .ok("GET", "/ventas/devoluciones", json!([]))
            .ok(
                "GET",
                "/caja/movimiento",
                json!([{ "tipo": "Egreso", "monto": 25, "fecha": "2024-01-05" }]),
            );

        let r = ReporteService::resumen(&backend, &token(), enero()).await.unwrap();
        assert_eq!(r.gastos, 25.0);
        assert_eq!(r.egresos, 25.0);
    }

    #[tokio::test]
    async fn test_respuesta_que_no_es_lista_es_decode() {
        let backend = FakeBackend::new();
        backend.ok("GET", "/productos", json!("mantenimiento"));
        let err = ReporteService::inventario(&backend, &token()).await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }
}
