//! Directorio de datos del servidor

use std::path::PathBuf;

/// Rutas dentro del directorio de datos
pub trait StorageConfig: Send + Sync {
    fn data_dir(&self) -> PathBuf;

    /// Configuración heredada de versiones que guardaban JSON
    fn config_path(&self) -> PathBuf {
        self.data_dir().join("config.json")
    }

    fn database_path(&self) -> PathBuf {
        self.data_dir().join("gestion.db")
    }

    fn logs_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }
}

/// Almacenamiento por defecto (`~/.gestion_negocio/`)
#[derive(Debug, Clone)]
pub struct DefaultStorageConfig {
    data_dir: PathBuf,
}

impl DefaultStorageConfig {
    pub fn new() -> Result<Self, String> {
        let home = dirs::home_dir().ok_or_else(|| "No se pudo obtener el directorio personal".to_string())?;
        Self::with_path(home.join(".gestion_negocio"))
    }

    /// Crea el almacenamiento en una ruta dada
    pub fn with_path(data_dir: PathBuf) -> Result<Self, String> {
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| format!("No se pudo crear el directorio de datos: {}", e))?;
        std::fs::create_dir_all(data_dir.join("logs"))
            .map_err(|e| format!("No se pudo crear el directorio de logs: {}", e))?;

        Ok(Self { data_dir })
    }
}

impl StorageConfig for DefaultStorageConfig {
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }
}
