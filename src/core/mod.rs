//! Núcleo
//! Modelos, reglas de negocio y servicios sobre el API remoto

pub mod categoria;
pub mod db;
pub mod lista;
pub mod models;
pub mod personal;
pub mod recurso;
pub mod reports;
pub mod services;
pub mod storage;
pub mod traits;

pub use traits::{DefaultStorageConfig, StorageConfig};
