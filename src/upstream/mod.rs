//! Cliente del API remoto
//! Todas las llamadas salen con el token Bearer del usuario y quedan en el registro de llamadas

pub mod auth;
pub mod backend;
pub mod client;
pub mod guard;
pub mod log_store;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::BearerToken;
pub use backend::{extraer_lista, fetch_lista, Backend};
pub use client::ApiClient;
pub use guard::{SubmissionGuard, Ticket};
pub use log_store::{LogStore, UpstreamLogEntry};
