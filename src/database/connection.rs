//! Conexión a SQLite
//!
//! Este módulo crea el pool de conexiones y el schema de la tabla `vehicle`.

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

use crate::config::database::DatabaseConfig;

const CREATE_VEHICLE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS vehicle (
        body_class TEXT,
        make TEXT,
        model TEXT,
        model_year TEXT,
        vin TEXT PRIMARY KEY
    )
"#;

/// Conexión a la base de datos, creada una vez al arrancar el proceso
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// Abrir el pool y asegurar que existe la tabla `vehicle`
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🔗 Conectando a la base de datos: {}", mask_database_url(&config.url));

        let pool = config.create_pool().await?;
        init_schema(&pool).await?;

        info!("✅ Base de datos lista");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Cerrar todas las conexiones del pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Verificar si la tabla `vehicle` ya existe
pub async fn vehicle_table_exists(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'vehicle'")
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

/// Crear la tabla `vehicle` si no existe
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_VEHICLE_TABLE).execute(pool).await?;
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };
    match url.find("://") {
        Some(scheme_end) if scheme_end < at_pos => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
