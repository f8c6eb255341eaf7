//! Reportes
//! Series por rango de tiempo y totales derivados de las listas del API

mod buckets;
mod range;

pub use buckets::{agrupar, Fechado, Serie};
pub use range::{dias_del_mes, inicio_semana, parse_fecha, Rango};

use crate::core::models::{
    Cobro, Devolucion, Gasto, GestionPersonal, MovimientoCaja, PagoRealizado, Producto,
    TipoMovimiento, Venta,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! impl_fechado {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Fechado for $ty {
                fn fecha(&self) -> Option<&str> {
                    self.fecha.as_deref()
                }
            }
        )*
    };
}

impl_fechado!(
    Venta,
    Devolucion,
    Gasto,
    MovimientoCaja,
    PagoRealizado,
    Cobro,
    GestionPersonal,
);

/// Series simples disponibles en `/api/reportes/:tipo`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoReporte {
    Ventas,
    Gastos,
    Ingresos,
    Egresos,
    Devoluciones,
    Pagos,
    Cobros,
}

impl TipoReporte {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoReporte::Ventas => "ventas",
            TipoReporte::Gastos => "gastos",
            TipoReporte::Ingresos => "ingresos",
            TipoReporte::Egresos => "egresos",
            TipoReporte::Devoluciones => "devoluciones",
            TipoReporte::Pagos => "pagos",
            TipoReporte::Cobros => "cobros",
        }
    }
}

impl fmt::Display for TipoReporte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoReporte {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ventas" => Ok(TipoReporte::Ventas),
            "gastos" => Ok(TipoReporte::Gastos),
            "ingresos" => Ok(TipoReporte::Ingresos),
            "egresos" => Ok(TipoReporte::Egresos),
            "devoluciones" => Ok(TipoReporte::Devoluciones),
            "pagos" => Ok(TipoReporte::Pagos),
            "cobros" => Ok(TipoReporte::Cobros),
            other => Err(format!("Reporte desconocido: {}", other)),
        }
    }
}

/// Monto de un movimiento si es del tipo pedido, cero en otro caso
pub fn monto_si(tipo: TipoMovimiento) -> impl Fn(&MovimientoCaja) -> f64 {
    move |m| if m.tipo == tipo { m.monto } else { 0.0 }
}

/// Ingresos y egresos alineados sobre las mismas etiquetas
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Flujo {
    pub rango: Rango,
    pub etiquetas: Vec<String>,
    pub ingresos: Vec<f64>,
    pub egresos: Vec<f64>,
    pub balance: Vec<f64>,
    pub total_ingresos: f64,
    pub total_egresos: f64,
}

pub fn flujo(
    movimientos: &[MovimientoCaja],
    rango: Rango,
    referencia: NaiveDate,
    ahora: NaiveDateTime,
) -> Flujo {
    let ingresos = agrupar(movimientos, rango, referencia, ahora, monto_si(TipoMovimiento::Ingreso));
    let egresos = agrupar(movimientos, rango, referencia, ahora, monto_si(TipoMovimiento::Egreso));
    let balance = ingresos
        .valores
        .iter()
        .zip(&egresos.valores)
        .map(|(i, e)| i - e)
        .collect();

    Flujo {
        rango,
        etiquetas: ingresos.etiquetas,
        ingresos: ingresos.valores,
        egresos: egresos.valores,
        balance,
        total_ingresos: ingresos.total,
        total_egresos: egresos.total,
    }
}

/// Totales del período (tarjetas del tablero)
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumenPeriodo {
    pub rango: Rango,
    pub ventas: f64,
    pub num_ventas: usize,
    pub gastos: f64,
    pub devoluciones: f64,
    pub ingresos: f64,
    pub egresos: f64,
    pub balance: f64,
}

pub struct DatosResumen<'a> {
    pub ventas: &'a [Venta],
    pub gastos: &'a [Gasto],
    pub devoluciones: &'a [Devolucion],
    pub movimientos: &'a [MovimientoCaja],
}

pub fn resumen(
    datos: DatosResumen<'_>,
    rango: Rango,
    referencia: NaiveDate,
    ahora: NaiveDateTime,
) -> ResumenPeriodo {
    let ventas = agrupar(datos.ventas, rango, referencia, ahora, Venta::total_efectivo);
    let num_ventas = agrupar(datos.ventas, rango, referencia, ahora, |_| 1.0).total as usize;
    let gastos = agrupar(datos.gastos, rango, referencia, ahora, Gasto::total).total;
    let devoluciones = agrupar(datos.devoluciones, rango, referencia, ahora, |d| d.monto).total;
    let flujo = flujo(datos.movimientos, rango, referencia, ahora);

    ResumenPeriodo {
        rango,
        ventas: ventas.total,
        num_ventas,
        gastos,
        devoluciones,
        ingresos: flujo.total_ingresos,
        egresos: flujo.total_egresos,
        balance: flujo.total_ingresos - flujo.total_egresos,
    }
}

/// Valorización del inventario actual
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValorInventario {
    pub productos: usize,
    pub unidades: f64,
    pub valor_costo: f64,
    pub valor_venta: f64,
    pub margen_potencial: f64,
    pub agotados: Vec<String>,
}

pub fn inventario(productos: &[Producto]) -> ValorInventario {
    let mut valor = ValorInventario {
        productos: productos.len(),
        unidades: 0.0,
        valor_costo: 0.0,
        valor_venta: 0.0,
        margen_potencial: 0.0,
        agotados: Vec::new(),
    };

    for p in productos {
        let disponible = p.cantidad_disponible();
        if disponible <= 0.0 {
            valor.agotados.push(p.nombre.clone());
            continue;
        }
        valor.unidades += disponible;
        valor.valor_costo += p.precio_compra * disponible;
        valor.valor_venta += p.precio_venta * disponible;
        valor.margen_potencial += p.margen_unitario() * disponible;
    }
    valor
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(y: i32, m: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dia).unwrap()
    }

    fn ahora() -> NaiveDateTime {
        d(2024, 1, 31).and_hms_opt(18, 0, 0).unwrap()
    }

    fn movimientos() -> Vec<MovimientoCaja> {
        serde_json::from_value(json!([
            { "tipo": "ingreso", "monto": 200, "fecha": "2024-01-02" },
            { "tipo": "egreso", "monto": 80, "fecha": "2024-01-02" },
            { "tipo": "egreso", "monto": 20, "fecha": "2024-01-10" },
            { "tipo": "ingreso", "monto": 999, "fecha": "2023-12-31" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_flujo_alineado() {
        let f = flujo(&movimientos(), Rango::Mes, d(2024, 1, 1), ahora());
        assert_eq!(f.etiquetas.len(), 31);
        assert_eq!(f.ingresos[1], 200.0);
        assert_eq!(f.egresos[1], 80.0);
        assert_eq!(f.balance[1], 120.0);
        assert_eq!(f.balance[9], -20.0);
        assert_eq!(f.total_ingresos, 200.0);
        assert_eq!(f.total_egresos, 100.0);
    }

    #[test]
    fn test_resumen_periodo() {
        let ventas: Vec<Venta> = serde_json::from_value(json!([
            { "total": 100, "fecha": "2024-01-01" },
            { "total": 50, "fecha": "2024-01-15" },
            { "total": 70, "fecha": "2024-02-01" }
        ]))
        .unwrap();
        let gastos: Vec<Gasto> = serde_json::from_value(json!([
            { "descripcion": "Luz", "costoUnitario": 15, "cantidad": 2, "fecha": "2024-01-05" }
        ]))
        .unwrap();
        let devoluciones: Vec<Devolucion> =
            serde_json::from_value(json!([{ "monto": 10, "fecha": "2024-01-20" }])).unwrap();
        let movimientos = movimientos();

        let r = resumen(
            DatosResumen {
                ventas: &ventas,
                gastos: &gastos,
                devoluciones: &devoluciones,
                movimientos: &movimientos,
            },
            Rango::Mes,
            d(2024, 1, 10),
            ahora(),
        );
        assert_eq!(r.ventas, 150.0);
        assert_eq!(r.num_ventas, 2);
        assert_eq!(r.gastos, 30.0);
        assert_eq!(r.devoluciones, 10.0);
        assert_eq!(r.balance, 100.0);
    }

    #[test]
    fn test_inventario() {
        let productos: Vec<Producto> = serde_json::from_value(json!([
            { "nombre": "Arroz", "precioCompra": 1, "precioVenta": 1.5, "cantidad": 10 },
            { "nombre": "Aceite", "precioCompra": 3, "precioVenta": 4, "cantidad": 5, "cantidadVendida": 5 }
        ]))
        .unwrap();
        let v = inventario(&productos);
        assert_eq!(v.productos, 2);
        assert_eq!(v.unidades, 10.0);
        assert_eq!(v.valor_costo, 10.0);
        assert_eq!(v.valor_venta, 15.0);
        assert_eq!(v.margen_potencial, 5.0);
        assert_eq!(v.agotados, vec!["Aceite".to_string()]);
    }

    #[test]
    fn test_tipo_reporte_from_str() {
        assert_eq!("gastos".parse::<TipoReporte>().unwrap(), TipoReporte::Gastos);
        assert!("clientes".parse::<TipoReporte>().is_err());
    }
}
