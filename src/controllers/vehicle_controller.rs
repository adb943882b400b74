use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::clients::VehicleLookupClient;
use crate::dto::vehicle_dto::{LookupResponse, RemoveResponse, VinPath};
use crate::repositories::vehicle_repository::VehicleStore;
use crate::services::{ExportService, VinLookupService};
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    lookup_service: VinLookupService,
    export_service: ExportService,
}

impl VehicleController {
    pub fn new(store: Arc<dyn VehicleStore>, upstream: Arc<dyn VehicleLookupClient>) -> Self {
        Self {
            lookup_service: VinLookupService::new(store.clone(), upstream),
            export_service: ExportService::new(store),
        }
    }

    pub async fn lookup(&self, request: VinPath) -> AppResult<LookupResponse> {
        // Un VIN mal formado nunca llega al store ni a vPIC
        request.validate()?;

        match self.lookup_service.lookup(&request.vin).await {
            Ok(outcome) => Ok(outcome.into()),
            Err(AppError::DuplicateVin(vin)) => {
                // Otro request llenó el cache entre nuestro get y el create
                info!("Vehicle {} cached by a concurrent lookup, re-reading", vin);
                match self.lookup_service.cached(&vin).await? {
                    Some(vehicle) => Ok(LookupResponse::new(&vehicle, true)),
                    None => Err(AppError::DuplicateVin(vin)),
                }
            }
            Err(e) => {
                if e.is_validation() {
                    warn!("Vehicle {} rejected by validation: {}", request.vin, e);
                }
                Err(e)
            }
        }
    }

    pub async fn remove(&self, request: VinPath) -> AppResult<RemoveResponse> {
        request.validate()?;

        let removal_success = self.lookup_service.remove(&request.vin).await?;
        Ok(RemoveResponse {
            vin: request.vin,
            removal_success,
        })
    }

    /// Exportar el cache a Parquet, refrescando también el archivo en disco
    pub async fn export(&self, export_path: &str) -> AppResult<Vec<u8>> {
        self.export_service.export_to_file(export_path).await
    }
}
