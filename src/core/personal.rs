//! Saldos de gestión personal por colaborador

use crate::core::models::{Colaborador, GestionPersonal, PagoRealizado, TipoRegistroPersonal};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SaldoColaborador {
    pub colaborador_id: String,
    pub nombre: Option<String>,
    pub salario: f64,
    pub trabajado: f64,
    pub adelantos: f64,
    pub faltantes: f64,
    pub pagado: f64,
    /// trabajado - adelantos - faltantes - pagado
    pub saldo: f64,
}

/// Un saldo por colaborador conocido, más los que solo aparecen en registros o pagos.
/// Registros sin colaborador se ignoran.
pub fn resumen_por_colaborador(
    colaboradores: &[Colaborador],
    registros: &[GestionPersonal],
    pagos: &[PagoRealizado],
) -> Vec<SaldoColaborador> {
    let mut saldos: BTreeMap<String, SaldoColaborador> = BTreeMap::new();

    for c in colaboradores {
        if let Some(id) = &c.id {
            saldos.insert(
                id.clone(),
                SaldoColaborador {
                    colaborador_id: id.clone(),
                    nombre: Some(c.nombre.clone()),
                    salario: c.salario,
                    ..Default::default()
                },
            );
        }
    }

    for r in registros {
        let Some(id) = r.colaborador_id.as_deref() else {
            continue;
        };
        let saldo = saldos.entry(id.to_string()).or_insert_with(|| nuevo(id));
        match r.tipo {
            TipoRegistroPersonal::Trabajo => saldo.trabajado += r.monto,
            TipoRegistroPersonal::Adelanto => saldo.adelantos += r.monto,
            TipoRegistroPersonal::Faltante => saldo.faltantes += r.monto,
        }
    }

    for p in pagos {
        let Some(id) = p.colaborador_id.as_deref() else {
            continue;
        };
        saldos.entry(id.to_string()).or_insert_with(|| nuevo(id)).pagado += p.monto;
    }

    saldos
        .into_values()
        .map(|mut s| {
            s.saldo = s.trabajado - s.adelantos - s.faltantes - s.pagado;
            s
        })
        .collect()
}

fn nuevo(id: &str) -> SaldoColaborador {
    SaldoColaborador {
        colaborador_id: id.to_string(),
        ..Default::default()
    }
}
