//! Exportación del cache a Parquet
//!
//! Vuelca la tabla `vehicle` completa a un archivo Parquet con las mismas
//! columnas que la tabla.

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleStore;
use crate::utils::errors::AppError;

pub const PARQUET_CONTENT_TYPE: &str = "application/vnd.apache.parquet";
pub const EXPORT_FILE_NAME: &str = "vehicle.parquet";

pub struct ExportService {
    store: Arc<dyn VehicleStore>,
}

impl ExportService {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    /// Serializar todo el cache a bytes Parquet
    pub async fn export_bytes(&self) -> Result<Vec<u8>, AppError> {
        let vehicles = self.store.list_all().await?;
        let bytes = vehicles_to_parquet(&vehicles)?;
        info!("📦 Exported {} vehicles ({} bytes)", vehicles.len(), bytes.len());
        Ok(bytes)
    }

    /// Escribir el export en disco y devolver los mismos bytes
    pub async fn export_to_file(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, AppError> {
        let path = path.as_ref();
        let bytes = self.export_bytes().await?;
        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| AppError::Export(format!("Error writing {}: {}", path.display(), e)))?;
        info!("💾 Export written to {}", path.display());
        Ok(bytes)
    }
}

/// Schema del export, en el orden de columnas de la tabla
pub fn vehicle_schema() -> Schema {
    Schema::new(vec![
        Field::new("body_class", DataType::Utf8, false),
        Field::new("make", DataType::Utf8, false),
        Field::new("model", DataType::Utf8, false),
        Field::new("model_year", DataType::Utf8, false),
        Field::new("vin", DataType::Utf8, false),
    ])
}

fn string_column<'a>(vehicles: &'a [Vehicle], field: impl Fn(&'a Vehicle) -> &'a str) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(vehicles.iter().map(field)))
}

pub fn vehicles_to_parquet(vehicles: &[Vehicle]) -> Result<Vec<u8>, AppError> {
    let schema = Arc::new(vehicle_schema());
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            string_column(vehicles, Vehicle::body_class),
            string_column(vehicles, Vehicle::make),
            string_column(vehicles, Vehicle::model),
            string_column(vehicles, Vehicle::model_year),
            string_column(vehicles, Vehicle::vin),
        ],
    )?;

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lookup_service::tests::{peterbilt, sqlite_store};
    use arrow::array::Array;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn read_rows(path: &Path) -> Vec<RecordBatch> {
        let file = std::fs::File::open(path).unwrap();
        ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_db_as_parquet() {
        let store = sqlite_store().await;
        store.create(peterbilt()).await.unwrap();
        let service = ExportService::new(store);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let bytes = service.export_to_file(&path).await.unwrap();
        assert!(!bytes.is_empty());

        let batches = read_rows(&path);
        let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(rows, 1);

        let batch = &batches[0];
        let columns: Vec<String> = batch.schema().fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(columns, vec!["body_class", "make", "model", "model_year", "vin"]);
        let vins = batch
            .column_by_name("vin")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(vins.value(0), "1XPWD40X1ED215307");
        let makes = batch
            .column_by_name("make")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(makes.value(0), "PETERBILT");
    }

    #[tokio::test]
    async fn test_export_empty_cache() {
        let service = ExportService::new(sqlite_store().await);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        service.export_to_file(&path).await.unwrap();

        let rows: usize = read_rows(&path).iter().map(|b| b.num_rows()).sum();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn test_export_to_missing_directory_fails() {
        let service = ExportService::new(sqlite_store().await);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(EXPORT_FILE_NAME);
        let err = service.export_to_file(&path).await.unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }

    #[test]
    fn test_parquet_magic_bytes() {
        let bytes = vehicles_to_parquet(&[peterbilt()]).unwrap();
        assert_eq!(&bytes[..4], b"PAR1");
        assert_eq!(&bytes[bytes.len() - 4..], b"PAR1");
    }
}
