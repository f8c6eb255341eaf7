use crate::core::db;
use crate::core::models::AppConfig;
use crate::core::storage::ConfigStorage;
use crate::core::traits::{DefaultStorageConfig, StorageConfig};
use crate::error::{AppError, AppResult};
use crate::upstream::{ApiClient, Backend, LogStore, SubmissionGuard};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Estado compartido del servidor web
pub struct AppState {
    pub storage: DefaultStorageConfig,
    pub db_pool: SqlitePool,
    pub config: RwLock<AppConfig>,
    pub log_store: Arc<LogStore>,
    pub guard: SubmissionGuard,
    backend: RwLock<Arc<dyn Backend>>,
    // sin clave, `/api/config` y `/api/logs` quedan cerrados
    admin_key: Option<String>,
}

impl AppState {
    /// Abre la base del directorio de datos, carga la configuración y crea el cliente del API.
    /// `api_base_url` (CLI o entorno) tiene prioridad sobre la guardada.
    pub async fn new(
        storage: DefaultStorageConfig,
        api_base_url: Option<String>,
        admin_key: Option<String>,
    ) -> Result<Self, String> {
        let db_pool = db::init_db(&storage.database_path()).await?;
        let mut config = ConfigStorage::load(&db_pool, &storage).await?;

        if let Some(url) = api_base_url.filter(|u| !u.trim().is_empty()) {
            if url != config.api_base_url {
                tracing::info!("Usando API {} (antes {})", url, config.api_base_url);
                config.api_base_url = url;
                config.validate()?;
                ConfigStorage::save(&db_pool, &config).await?;
            }
        }

        let log_store = Arc::new(LogStore::new(config.log_capacity));
        let client = ApiClient::new(&config, log_store.clone())?;
        tracing::info!("API remoto: {}", client.base_url());

        if admin_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            tracing::warn!("ADMIN_KEY no definida: configuración y registro de llamadas deshabilitados");
        }
        Ok(Self::with_backend(storage, db_pool, config, log_store, Arc::new(client))
            .with_admin_key(admin_key))
    }

    pub fn with_backend(
        storage: DefaultStorageConfig,
        db_pool: SqlitePool,
        config: AppConfig,
        log_store: Arc<LogStore>,
        backend: Arc<dyn Backend>,
    ) -> Self {
        Self {
            storage,
            db_pool,
            config: RwLock::new(config),
            log_store,
            guard: SubmissionGuard::new(),
            backend: RwLock::new(backend),
            admin_key: None,
        }
    }

    pub fn with_admin_key(mut self, admin_key: Option<String>) -> Self {
        self.admin_key = admin_key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Compara la clave recibida con la de administración
    pub fn verificar_admin(&self, clave: Option<&str>) -> AppResult<()> {
        let Some(esperada) = self.admin_key.as_deref() else {
            return Err(AppError::Forbidden);
        };
        match clave {
            Some(clave) if Sha256::digest(clave.as_bytes()) == Sha256::digest(esperada.as_bytes()) => {
                Ok(())
            }
            _ => Err(AppError::Forbidden),
        }
    }

    /// Cliente vigente; una configuración nueva no corta las llamadas en curso
    pub async fn backend(&self) -> Arc<dyn Backend> {
        self.backend.read().await.clone()
    }

    /// Valida, guarda y aplica una configuración nueva
    pub async fn apply_config(&self, config: AppConfig) -> AppResult<AppConfig> {
        config.validate().map_err(AppError::Validation)?;
        let client = ApiClient::new(&config, self.log_store.clone()).map_err(AppError::Validation)?;
        ConfigStorage::save(&self.db_pool, &config).await?;

        self.log_store.set_capacity(config.log_capacity);
        *self.backend.write().await = Arc::new(client);
        *self.config.write().await = config.clone();

        tracing::info!("Configuración actualizada: API {}", config.api_base_url);
        Ok(config)
    }
}
