//! Rangos de tiempo y lectura de fechas

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rango seleccionado en los gráficos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rango {
    #[serde(alias = "day", alias = "hoy")]
    Dia,
    #[serde(alias = "week")]
    Semana,
    #[serde(alias = "month")]
    Mes,
    #[serde(alias = "year", alias = "año")]
    Anio,
    #[serde(alias = "historical", alias = "all")]
    Historico,
}

impl Rango {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rango::Dia => "dia",
            Rango::Semana => "semana",
            Rango::Mes => "mes",
            Rango::Anio => "anio",
            Rango::Historico => "historico",
        }
    }

    /// Intervalo semiabierto `[inicio, fin)` que cubre el rango.
    /// `Historico` no tiene límites.
    pub fn limites(&self, referencia: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let (inicio, fin) = match self {
            Rango::Dia => (referencia, referencia + Duration::days(1)),
            Rango::Semana => {
                let lunes = inicio_semana(referencia);
                (lunes, lunes + Duration::days(7))
            }
            Rango::Mes => {
                let primero = referencia.with_day(1)?;
                (primero, primero + Duration::days(dias_del_mes(referencia) as i64))
            }
            Rango::Anio => (
                NaiveDate::from_ymd_opt(referencia.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(referencia.year() + 1, 1, 1)?,
            ),
            Rango::Historico => return None,
        };
        Some((inicio.and_time(NaiveTime::MIN), fin.and_time(NaiveTime::MIN)))
    }
}

impl fmt::Display for Rango {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rango {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dia" | "día" | "day" | "hoy" => Ok(Rango::Dia),
            "semana" | "week" => Ok(Rango::Semana),
            "mes" | "month" => Ok(Rango::Mes),
            "anio" | "año" | "year" => Ok(Rango::Anio),
            "historico" | "histórico" | "historical" | "all" => Ok(Rango::Historico),
            other => Err(format!("Rango desconocido: {}", other)),
        }
    }
}

/// Lunes de la semana ISO que contiene `fecha`
pub fn inicio_semana(fecha: NaiveDate) -> NaiveDate {
    fecha - Duration::days(fecha.weekday().num_days_from_monday() as i64)
}

pub fn dias_del_mes(fecha: NaiveDate) -> u32 {
    let (anio, mes) = (fecha.year(), fecha.month());
    let siguiente = if mes == 12 {
        NaiveDate::from_ymd_opt(anio + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(anio, mes + 1, 1)
    };
    match (siguiente, NaiveDate::from_ymd_opt(anio, mes, 1)) {
        (Some(siguiente), Some(primero)) => (siguiente - primero).num_days() as u32,
        _ => 31,
    }
}

/// Interpreta la fecha de un registro. Fechas ausentes o mal formadas caen en `ahora`.
/// Con RFC 3339 se conserva la hora local escrita, sin convertir de zona.
pub fn parse_fecha(valor: Option<&str>, ahora: NaiveDateTime) -> NaiveDateTime {
    let Some(texto) = valor.map(str::trim).filter(|s| !s.is_empty()) else {
        return ahora;
    };

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(texto) {
        return dt.naive_local();
    }
    for formato in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(texto, formato) {
            return dt;
        }
    }
    for formato in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(texto, formato) {
            return d.and_time(NaiveTime::MIN);
        }
    }

    tracing::debug!("Fecha inválida '{}', se usa la fecha actual", texto);
    ahora
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("month".parse::<Rango>().unwrap(), Rango::Mes);
        assert_eq!("Año".parse::<Rango>().unwrap(), Rango::Anio);
        assert_eq!("historical".parse::<Rango>().unwrap(), Rango::Historico);
        assert!("quincena".parse::<Rango>().is_err());
    }

    #[test]
    fn test_serde_aliases() {
        let r: Rango = serde_json::from_str("\"week\"").unwrap();
        assert_eq!(r, Rango::Semana);
        assert_eq!(serde_json::to_string(&Rango::Anio).unwrap(), "\"anio\"");
    }

    #[test]
    fn test_dias_del_mes() {
        assert_eq!(dias_del_mes(fecha(2024, 2, 10)), 29);
        assert_eq!(dias_del_mes(fecha(2023, 2, 10)), 28);
        assert_eq!(dias_del_mes(fecha(2024, 12, 31)), 31);
        assert_eq!(dias_del_mes(fecha(2024, 4, 1)), 30);
    }

    #[test]
    fn test_limites_semana_empieza_lunes() {
        // 2024-01-17 es miércoles
        let (inicio, fin) = Rango::Semana.limites(fecha(2024, 1, 17)).unwrap();
        assert_eq!(inicio.date(), fecha(2024, 1, 15));
        assert_eq!(fin.date(), fecha(2024, 1, 22));
        assert!(Rango::Historico.limites(fecha(2024, 1, 17)).is_none());
    }

    #[test]
    fn test_parse_fecha_formatos() {
        let ahora = fecha(2030, 1, 1).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(
            parse_fecha(Some("2024-01-15T08:30:00.000Z"), ahora),
            fecha(2024, 1, 15).and_hms_opt(8, 30, 0).unwrap()
        );
        assert_eq!(
            parse_fecha(Some("2024-01-15T08:30:00-05:00"), ahora),
            fecha(2024, 1, 15).and_hms_opt(8, 30, 0).unwrap()
        );
        assert_eq!(
            parse_fecha(Some("2024-01-15 21:05:09"), ahora),
            fecha(2024, 1, 15).and_hms_opt(21, 5, 9).unwrap()
        );
        assert_eq!(
            parse_fecha(Some("2024-01-15"), ahora),
            fecha(2024, 1, 15).and_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_fecha_invalida_usa_ahora() {
        let ahora = fecha(2030, 1, 1).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(parse_fecha(Some("ayer por la tarde"), ahora), ahora);
        assert_eq!(parse_fecha(Some(""), ahora), ahora);
        assert_eq!(parse_fecha(None, ahora), ahora);
    }
}
