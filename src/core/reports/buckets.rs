//! Agrupación de registros fechados en intervalos fijos

use super::range::{dias_del_mes, inicio_semana, parse_fecha, Rango};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

const DIAS_SEMANA: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];
const MESES: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Registro con fecha (texto tal como llega del API)
pub trait Fechado {
    fn fecha(&self) -> Option<&str>;
}

/// Serie etiquetada lista para un gráfico
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Serie {
    pub rango: Rango,
    pub etiquetas: Vec<String>,
    pub valores: Vec<f64>,
    pub total: f64,
}

impl Serie {
    pub fn valor(&self, etiqueta: &str) -> Option<f64> {
        self.etiquetas
            .iter()
            .position(|e| e == etiqueta)
            .map(|i| self.valores[i])
    }
}

/// Suma `valor` de cada registro en su intervalo. Los intervalos vacíos quedan en cero
/// y los registros fuera del rango se descartan.
///
/// * `referencia` - día que fija el rango (el día, su semana, su mes o su año)
/// * `ahora` - fecha asumida para registros sin fecha válida
pub fn agrupar<T, F>(
    registros: &[T],
    rango: Rango,
    referencia: NaiveDate,
    ahora: NaiveDateTime,
    valor: F,
) -> Serie
where
    T: Fechado,
    F: Fn(&T) -> f64,
{
    let puntos: Vec<(NaiveDateTime, f64)> = registros
        .iter()
        .map(|r| (parse_fecha(r.fecha(), ahora), valor(r)))
        .collect();

    let anios = puntos.iter().map(|(f, _)| f.year());
    let desde = anios.clone().min().unwrap_or(referencia.year());
    let hasta = anios.max().unwrap_or(referencia.year());
    let lunes = inicio_semana(referencia);

    let etiquetas: Vec<String> = match rango {
        Rango::Dia => (0..24).map(|h| format!("{:02}:00", h)).collect(),
        Rango::Semana => DIAS_SEMANA.iter().map(|d| d.to_string()).collect(),
        Rango::Mes => (1..=dias_del_mes(referencia)).map(|d| d.to_string()).collect(),
        Rango::Anio => MESES.iter().map(|m| m.to_string()).collect(),
        Rango::Historico => (desde..=hasta).map(|a| a.to_string()).collect(),
    };

    // Historico no tiene límites: todo registro cae en su año
    let limites = rango.limites(referencia);
    let indice = |f: NaiveDateTime| -> Option<usize> {
        if let Some((inicio, fin)) = limites {
            if f < inicio || f >= fin {
                return None;
            }
        }
        let i = match rango {
            Rango::Dia => f.hour() as i64,
            Rango::Semana => (f.date() - lunes).num_days(),
            Rango::Mes => f.day0() as i64,
            Rango::Anio => f.month0() as i64,
            Rango::Historico => (f.year() - desde) as i64,
        };
        usize::try_from(i).ok()
    };

    let mut valores = vec![0.0; etiquetas.len()];
    for (fecha, v) in puntos {
        if let Some(slot) = indice(fecha).and_then(|i| valores.get_mut(i)) {
            *slot += v;
        }
    }
    let total = valores.iter().sum();

    Serie {
        rango,
        etiquetas,
        valores,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Registro {
        fecha: Option<&'static str>,
        monto: f64,
    }

    impl Fechado for Registro {
        fn fecha(&self) -> Option<&str> {
            self.fecha
        }
    }

    fn r(fecha: &'static str, monto: f64) -> Registro {
        Registro {
            fecha: Some(fecha),
            monto,
        }
    }

    fn d(y: i32, m: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dia).unwrap()
    }

    fn ahora() -> NaiveDateTime {
        d(2024, 6, 15).and_hms_opt(10, 0, 0).unwrap()
    }

    #[test]
    fn test_cantidad_de_etiquetas() {
        let vacio: Vec<Registro> = Vec::new();
        let referencia = d(2024, 2, 10);
        let cuenta = |rango| agrupar(&vacio, rango, referencia, ahora(), |x| x.monto).etiquetas.len();
        assert_eq!(cuenta(Rango::Dia), 24);
        assert_eq!(cuenta(Rango::Semana), 7);
        assert_eq!(cuenta(Rango::Mes), 29);
        assert_eq!(cuenta(Rango::Anio), 12);
        assert_eq!(cuenta(Rango::Historico), 1);
    }

    #[test]
    fn test_mes_enero() {
        let ventas = vec![
            r("2024-01-01", 100.0),
            r("2024-01-15", 50.0),
            r("2024-02-01", 70.0),
            r("2023-12-31", 30.0),
        ];
        let serie = agrupar(&ventas, Rango::Mes, d(2024, 1, 20), ahora(), |x| x.monto);
        assert_eq!(serie.etiquetas.len(), 31);
        assert_eq!(serie.valor("1"), Some(100.0));
        assert_eq!(serie.valor("15"), Some(50.0));
        assert_eq!(serie.valor("31"), Some(0.0));
        assert_eq!(serie.valor("2"), Some(0.0));
        assert_eq!(serie.total, 150.0);
    }

    #[test]
    fn test_dia_por_hora() {
        let registros = vec![
            r("2024-03-05T08:15:00", 10.0),
            r("2024-03-05T08:45:00", 5.0),
            r("2024-03-05T23:59:59", 1.0),
            r("2024-03-06T00:00:00", 99.0),
        ];
        let serie = agrupar(&registros, Rango::Dia, d(2024, 3, 5), ahora(), |x| x.monto);
        assert_eq!(serie.etiquetas[0], "00:00");
        assert_eq!(serie.valor("08:00"), Some(15.0));
        assert_eq!(serie.valor("23:00"), Some(1.0));
        assert_eq!(serie.total, 16.0);
    }

    #[test]
    fn test_semana_lunes_a_domingo() {
        let registros = vec![
            r("2024-01-15", 1.0), // lunes
            r("2024-01-21", 2.0), // domingo
            r("2024-01-22", 4.0), // lunes siguiente
            r("2024-01-14", 8.0), // domingo anterior
        ];
        let serie = agrupar(&registros, Rango::Semana, d(2024, 1, 17), ahora(), |x| x.monto);
        assert_eq!(serie.etiquetas.first().map(String::as_str), Some("Lun"));
        assert_eq!(serie.valores, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
        assert_eq!(serie.total, 3.0);
    }

    #[test]
    fn test_anio_por_mes() {
        let registros = vec![
            r("2024-01-31", 10.0),
            r("2024-12-01", 20.0),
            r("2025-01-01", 40.0),
        ];
        let serie = agrupar(&registros, Rango::Anio, d(2024, 7, 1), ahora(), |x| x.monto);
        assert_eq!(serie.valor("Ene"), Some(10.0));
        assert_eq!(serie.valor("Dic"), Some(20.0));
        assert_eq!(serie.total, 30.0);
    }

    #[test]
    fn test_historico_cubre_todos_los_anios() {
        let registros = vec![r("2021-05-01", 1.0), r("2024-01-01", 2.0), r("2024-08-01", 3.0)];
        let serie = agrupar(&registros, Rango::Historico, d(2024, 7, 1), ahora(), |x| x.monto);
        assert_eq!(serie.etiquetas, vec!["2021", "2022", "2023", "2024"]);
        assert_eq!(serie.valores, vec![1.0, 0.0, 0.0, 5.0]);
        assert_eq!(serie.total, 6.0);
    }

    #[test]
    fn test_borde_de_fin_de_mes() {
        let registros = vec![
            r("2024-01-31T23:59:59", 1.0),
            r("2024-02-01T00:00:00", 10.0),
            r("2024-01-01T00:00:00", 100.0),
        ];
        let serie = agrupar(&registros, Rango::Mes, d(2024, 1, 10), ahora(), |x| x.monto);
        assert_eq!(serie.valor("31"), Some(1.0));
        assert_eq!(serie.valor("1"), Some(100.0));
        assert_eq!(serie.total, 101.0);
    }

    #[test]
    fn test_fecha_invalida_cae_en_ahora() {
        let registros = vec![
            Registro {
                fecha: Some("no es fecha"),
                monto: 7.0,
            },
            Registro {
                fecha: None,
                monto: 3.0,
            },
        ];
        let serie = agrupar(&registros, Rango::Dia, d(2024, 6, 15), ahora(), |x| x.monto);
        assert_eq!(serie.valor("10:00"), Some(10.0));
    }

    #[test]
    fn test_total_igual_suma_en_rango() {
        let registros: Vec<Registro> = (1..=28)
            .map(|dia| Registro {
                fecha: Some(Box::leak(format!("2024-02-{:02}T12:00:00", dia).into_boxed_str())),
                monto: dia as f64,
            })
            .chain(std::iter::once(r("2024-03-01", 1000.0)))
            .collect();
        let serie = agrupar(&registros, Rango::Mes, d(2024, 2, 1), ahora(), |x| x.monto);
        let esperado: f64 = (1..=28).map(|x| x as f64).sum();
        assert_eq!(serie.total, esperado);
        assert_eq!(serie.valores.iter().sum::<f64>(), esperado);
    }
}
