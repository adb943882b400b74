//! Crear la tabla `vehicle` en la base de datos configurada
//!
//! Uso: `cargo run --bin setup_db` (lee `DATABASE_URL` del entorno o `.env`).

use anyhow::Result;
use dotenvy::dotenv;

use vin_cache::config::{DatabaseConfig, EnvironmentConfig};
use vin_cache::database::connection::{init_schema, mask_database_url, vehicle_table_exists};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;
    let db_config = DatabaseConfig::new(&config.database_url);

    println!("🔗 Base de datos: {}", mask_database_url(&db_config.url));
    let pool = db_config.create_pool().await?;

    if vehicle_table_exists(&pool).await? {
        println!("vehicle table already exists...");
    } else {
        init_schema(&pool).await?;
        println!("Successfully created database table...");
    }

    pool.close().await;
    Ok(())
}
