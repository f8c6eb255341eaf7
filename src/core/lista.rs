//! Copia local de una lista del API
//! Cada mutación se refleja en la lista sin caché ni invalidación: crear vuelve a pedir
//! la lista, eliminar quita el elemento localmente.

use crate::core::models::Identificado;
use crate::core::recurso::Recurso;
use crate::error::{AppError, AppResult};
use crate::upstream::{fetch_lista, Backend, BearerToken};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resultado de una eliminación
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Eliminacion {
    pub id: String,
    /// El API respondió 404: el elemento ya no existía
    pub ya_ausente: bool,
}

pub struct ListaLocal<T> {
    recurso: Recurso,
    items: Vec<T>,
}

impl<T> ListaLocal<T>
where
    T: DeserializeOwned + Identificado + Send,
{
    pub fn new(recurso: Recurso) -> Self {
        Self {
            recurso,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Un GET de la colección
    pub async fn cargar(&mut self, backend: &dyn Backend, token: &BearerToken) -> AppResult<&[T]> {
        self.items = fetch_lista(backend, token, self.recurso.path()).await?;
        Ok(&self.items)
    }

    /// Un POST y exactamente una recarga. Devuelve lo que respondió el API al crear.
    pub async fn crear(
        &mut self,
        backend: &dyn Backend,
        token: &BearerToken,
        form: &Value,
    ) -> AppResult<Value> {
        self.recurso.validar(form)?;
        let creado = backend.post(token, self.recurso.path(), form).await?;
        tracing::info!("{} creado por {}", self.recurso, token.subject());
        self.cargar(backend, token).await?;
        Ok(creado)
    }

    /// Un PUT; el elemento se reemplaza en su lugar
    pub async fn actualizar(
        &mut self,
        backend: &dyn Backend,
        token: &BearerToken,
        id: &str,
        form: &Value,
    ) -> AppResult<Value> {
        self.recurso.validar(form)?;
        let path = self.recurso.item_path(id)?;
        let actualizado = backend.put(token, &path, form).await?;

        let nuevo: Option<T> = match &actualizado {
            Value::Object(_) => T::deserialize(&actualizado).ok(),
            _ => None,
        };
        if let Some(nuevo) = nuevo {
            if let Some(slot) = self
                .items
                .iter_mut()
                .find(|item| item.id().as_deref() == Some(id))
            {
                *slot = nuevo;
            }
        }
        Ok(actualizado)
    }

    /// Exactamente un DELETE. Un 404 se toma como éxito: el elemento ya no existe.
    pub async fn eliminar(
        &mut self,
        backend: &dyn Backend,
        token: &BearerToken,
        id: &str,
    ) -> AppResult<Eliminacion> {
        let path = self.recurso.item_path(id)?;
        let ya_ausente = match backend.delete(token, &path).await {
            Ok(()) => false,
            Err(AppError::NotFound(_)) => {
                tracing::info!("{} {} ya no existía en el API", self.recurso, id);
                true
            }
            Err(e) => return Err(e),
        };

        if let Some(pos) = self.items.iter().position(|item| item.id().as_deref() == Some(id)) {
            self.items.remove(pos);
        }

        Ok(Eliminacion {
            id: id.to_string(),
            ya_ausente,
        })
    }

    /// Elimina en orden y se detiene en el primer error real
    pub async fn eliminar_varios(
        &mut self,
        backend: &dyn Backend,
        token: &BearerToken,
        ids: &[String],
    ) -> AppResult<Vec<Eliminacion>> {
        let mut resultados = Vec::with_capacity(ids.len());
        for id in ids {
            resultados.push(self.eliminar(backend, token, id).await?);
        }
        Ok(resultados)
    }
}
