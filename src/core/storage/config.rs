//! Persistencia de la configuración en SQLite

use crate::core::models::AppConfig;
use crate::core::traits::StorageConfig;
use sqlx::{Row, SqlitePool};

pub struct ConfigStorage;

impl ConfigStorage {
    /// Carga la configuración: base de datos, luego `config.json` heredado, luego valores por defecto
    pub async fn load<S: StorageConfig>(pool: &SqlitePool, storage: &S) -> Result<AppConfig, String> {
        let row = sqlx::query("SELECT value FROM configs WHERE key = 'app_config'")
            .fetch_optional(pool)
            .await
            .map_err(|e| format!("Failed to fetch config from DB: {}", e))?;

        if let Some(row) = row {
            let value: String = row.get("value");
            let config: AppConfig = serde_json::from_str(&value)
                .map_err(|e| format!("Failed to parse config from DB: {}", e))?;
            return Ok(config);
        }

        let config_path = storage.config_path();
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| format!("No se pudo leer config.json: {}", e))?;
            let config: AppConfig = serde_json::from_str(&content)
                .map_err(|e| format!("config.json inválido: {}", e))?;

            Self::save(pool, &config).await?;
            tracing::info!("Migrated config.json to database.");
            return Ok(config);
        }

        let default_config = AppConfig::default();
        Self::save(pool, &default_config).await?;
        Ok(default_config)
    }

    pub async fn save(pool: &SqlitePool, config: &AppConfig) -> Result<(), String> {
        let content = serde_json::to_string_pretty(config)
            .map_err(|e| format!("No se pudo serializar la configuración: {}", e))?;

        sqlx::query(
            "INSERT INTO configs (key, value, updated_at) VALUES ('app_config', ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(content)
        .bind(chrono::Utc::now().timestamp())
        .execute(pool)
        .await
        .map_err(|e| format!("Failed to save config to DB: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::init_memory_db;
    use crate::core::traits::DefaultStorageConfig;

    #[tokio::test]
    async fn test_load_guarda_valores_por_defecto() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DefaultStorageConfig::with_path(dir.path().to_path_buf()).unwrap();
        let pool = init_memory_db().await.unwrap();

        let config = ConfigStorage::load(&pool, &storage).await.unwrap();
        assert_eq!(config, AppConfig::default());

        let mut cambiada = config.clone();
        cambiada.request_timeout_secs = 5;
        ConfigStorage::save(&pool, &cambiada).await.unwrap();
        assert_eq!(ConfigStorage::load(&pool, &storage).await.unwrap().request_timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_migra_config_json() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DefaultStorageConfig::with_path(dir.path().to_path_buf()).unwrap();
        std::fs::write(
            storage.config_path(),
            r#"{"api_base_url":"https://negocio.example.com/api","request_timeout_secs":12}"#,
        )
        .unwrap();
        let pool = init_memory_db().await.unwrap();

        let config = ConfigStorage::load(&pool, &storage).await.unwrap();
        assert_eq!(config.api_base_url, "https://negocio.example.com/api");
        assert_eq!(config.request_timeout_secs, 12);

        // ya migrada: el archivo deja de consultarse
        std::fs::remove_file(storage.config_path()).unwrap();
        let again = ConfigStorage::load(&pool, &storage).await.unwrap();
        assert_eq!(again.request_timeout_secs, 12);
    }
}
