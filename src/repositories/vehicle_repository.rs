use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::vehicle::{Vehicle, VehicleRow};
use crate::utils::errors::AppError;

/// Persistencia de vehículos indexada por VIN
///
/// Solo existen create, read y delete: los registros son inmutables.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Insertar un vehículo nuevo. `DuplicateVin` si el VIN ya existe.
    async fn create(&self, vehicle: Vehicle) -> Result<Vehicle, AppError>;

    async fn get_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError>;

    /// Borrar y devolver el resultado de volver a consultar el VIN.
    ///
    /// `None` significa que el vehículo ya no está; `Some` que el borrado no
    /// tuvo efecto.
    async fn delete_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError>;

    async fn list_all(&self) -> Result<Vec<Vehicle>, AppError>;
}

pub struct SqliteVehicleRepository {
    pool: SqlitePool,
}

impl SqliteVehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for SqliteVehicleRepository {
    async fn create(&self, vehicle: Vehicle) -> Result<Vehicle, AppError> {
        sqlx::query(
            r#"
            INSERT INTO vehicle (body_class, make, model, model_year, vin)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(vehicle.body_class())
        .bind(vehicle.make())
        .bind(vehicle.model())
        .bind(vehicle.model_year())
        .bind(vehicle.vin())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateVin(vehicle.vin().to_string())
            }
            other => AppError::Database(other),
        })?;

        info!("Inserted vehicle {} into cache", vehicle.vin());
        Ok(vehicle)
    }

    async fn get_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            "SELECT body_class, make, model, model_year, vin FROM vehicle WHERE vin = ?",
        )
        .bind(vin)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                info!("Vehicle {} found in cache", vin);
                Ok(Some(Vehicle::try_from(row)?))
            }
            None => {
                info!("Vehicle {} not in cache", vin);
                Ok(None)
            }
        }
    }

    async fn delete_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
        let result = sqlx::query("DELETE FROM vehicle WHERE vin = ?")
            .bind(vin)
            .execute(&self.pool)
            .await?;
        info!("Deleted {} rows", result.rows_affected());

        // El resultado del borrado es lo que quede en la tabla, no rows_affected
        self.get_by_vin(vin).await
    }

    async fn list_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            "SELECT body_class, make, model, model_year, vin FROM vehicle",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }
}
