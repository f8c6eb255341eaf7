use crate::core::models::{Colaborador, GestionPersonal, PagoRealizado};
use crate::core::personal::{resumen_por_colaborador, SaldoColaborador};
use crate::core::recurso::Recurso;
use crate::error::AppResult;
use crate::upstream::{extraer_lista, fetch_lista, Backend, BearerToken};
use serde_json::Value;

const COLABORADORES_PATH: &str = "/gestion-personal/colaboradores";

pub struct PersonalService;

impl PersonalService {
    /// Colaboradores con sus registros, tal como los arma el API
    pub async fn colaboradores(backend: &dyn Backend, token: &BearerToken) -> AppResult<Vec<Value>> {
        extraer_lista(backend.get(token, COLABORADORES_PATH).await?)
    }

    pub async fn resumen(
        backend: &dyn Backend,
        token: &BearerToken,
    ) -> AppResult<Vec<SaldoColaborador>> {
        let (colaboradores, registros, pagos) = futures::try_join!(
            fetch_lista::<Colaborador>(backend, token, Recurso::Colaboradores.path()),
            fetch_lista::<GestionPersonal>(backend, token, Recurso::GestionPersonal.path()),
            fetch_lista::<PagoRealizado>(backend, token, Recurso::PagosRealizados.path()),
        )?;
        Ok(resumen_por_colaborador(&colaboradores, &registros, &pagos))
    }
}
