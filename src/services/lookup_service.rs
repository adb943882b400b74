//! Servicio de lookup de VIN (cache-aside)
//!
//! Compone el store, el cliente vPIC y el extractor: primero se consulta el
//! cache y solo en un miss se llama a la API externa y se guarda el resultado.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::VehicleLookupClient;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleStore;
use crate::services::response_extractor::extract;
use crate::utils::errors::AppError;

/// Resultado de un lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    pub vehicle: Vehicle,
    pub from_cache: bool,
}

pub struct VinLookupService {
    store: Arc<dyn VehicleStore>,
    upstream: Arc<dyn VehicleLookupClient>,
}

impl VinLookupService {
    pub fn new(store: Arc<dyn VehicleStore>, upstream: Arc<dyn VehicleLookupClient>) -> Self {
        Self { store, upstream }
    }

    /// Buscar un vehículo por VIN, llenando el cache en un miss.
    ///
    /// El VIN llega ya validado por la capa HTTP. Los errores del upstream,
    /// del extractor y `DuplicateVin` se propagan sin reintentos.
    pub async fn lookup(&self, vin: &str) -> Result<LookupOutcome, AppError> {
        if let Some(vehicle) = self.store.get_by_vin(vin).await? {
            debug!("📥 Cache HIT para VIN {}", vin);
            return Ok(LookupOutcome {
                vehicle,
                from_cache: true,
            });
        }

        debug!("❌ Cache MISS para VIN {}", vin);
        let raw = self.upstream.decode_vin(vin).await?;
        let vehicle = extract(&raw).map_err(|e| {
            warn!("⚠️ No se pudo extraer el vehículo {} de vPIC: {}", vin, e);
            e
        })?;
        info!("Extracted vehicle {} from vPIC response", vehicle.vin());

        let vehicle = self.store.create(vehicle).await?;
        Ok(LookupOutcome {
            vehicle,
            from_cache: false,
        })
    }

    /// Re-leer del cache sin llamar al upstream
    pub async fn cached(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
        self.store.get_by_vin(vin).await
    }

    /// Borrar un vehículo del cache. `true` si después del borrado ya no está.
    pub async fn remove(&self, vin: &str) -> Result<bool, AppError> {
        let remaining = self.store.delete_by_vin(vin).await?;
        if remaining.is_some() {
            warn!("⚠️ Vehicle {} still in cache after delete", vin);
        }
        Ok(remaining.is_none())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::database::DatabaseConfig;
    use crate::database::connection::init_schema;
    use crate::repositories::vehicle_repository::SqliteVehicleRepository;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub(crate) const TEST_VIN: &str = "1XPWD40X1ED215307";

    pub(crate) fn test_lookup_response() -> Value {
        json!({
            "Count": 4,
            "Message": "Results returned successfully.",
            "SearchCriteria": "VIN:1XPWD40X1ED215307",
            "Results": [
                { "Value": "PETERBILT", "ValueId": "495", "Variable": "Make", "VariableId": 26 },
                { "Value": "388", "ValueId": "2793", "Variable": "Model", "VariableId": 28 },
                { "Value": "2014", "ValueId": "", "Variable": "Model Year", "VariableId": 29 },
                { "Value": "Truck-Tractor", "ValueId": "66", "Variable": "Body Class", "VariableId": 5 }
            ]
        })
    }

    /// Upstream falso que cuenta las llamadas
    pub(crate) struct FakeUpstream {
        response: Value,
        pub calls: AtomicUsize,
    }

    impl FakeUpstream {
        pub(crate) fn new(response: Value) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl VehicleLookupClient for FakeUpstream {
        async fn decode_vin(&self, _vin: &str) -> Result<Value, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct FailingUpstream;

    #[async_trait]
    impl VehicleLookupClient for FailingUpstream {
        async fn decode_vin(&self, _vin: &str) -> Result<Value, AppError> {
            Err(AppError::UpstreamStatus(500))
        }
    }

    /// Store cuyo delete no tiene efecto
    struct StickyStore {
        vehicles: Mutex<Vec<Vehicle>>,
    }

    #[async_trait]
    impl VehicleStore for StickyStore {
        async fn create(&self, vehicle: Vehicle) -> Result<Vehicle, AppError> {
            self.vehicles.lock().unwrap().push(vehicle.clone());
            Ok(vehicle)
        }

        async fn get_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
            Ok(self
                .vehicles
                .lock()
                .unwrap()
                .iter()
                .find(|v| v.vin() == vin)
                .cloned())
        }

        async fn delete_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
            self.get_by_vin(vin).await
        }

        async fn list_all(&self) -> Result<Vec<Vehicle>, AppError> {
            Ok(self.vehicles.lock().unwrap().clone())
        }
    }

    /// Store cuyo primer get no ve el registro, como si otro request lo
    /// hubiera insertado entre el get y el create
    pub(crate) struct RacingStore {
        inner: Arc<SqliteVehicleRepository>,
        missed: AtomicBool,
    }

    impl RacingStore {
        pub(crate) fn new(inner: Arc<SqliteVehicleRepository>) -> Self {
            Self {
                inner,
                missed: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl VehicleStore for RacingStore {
        async fn create(&self, vehicle: Vehicle) -> Result<Vehicle, AppError> {
            self.inner.create(vehicle).await
        }

        async fn get_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
            if !self.missed.swap(true, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.get_by_vin(vin).await
        }

        async fn delete_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
            self.inner.delete_by_vin(vin).await
        }

        async fn list_all(&self) -> Result<Vec<Vehicle>, AppError> {
            self.inner.list_all().await
        }
    }

    pub(crate) async fn sqlite_store() -> Arc<SqliteVehicleRepository> {
        let pool = DatabaseConfig::in_memory().create_test_pool().await.unwrap();
        init_schema(&pool).await.unwrap();
        Arc::new(SqliteVehicleRepository::new(pool))
    }

    pub(crate) fn peterbilt() -> Vehicle {
        Vehicle::new("Truck-Tractor", "PETERBILT", "388", "2014", TEST_VIN).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_vehicle_not_in_cache() {
        let store = sqlite_store().await;
        let upstream = Arc::new(FakeUpstream::new(test_lookup_response()));
        let service = VinLookupService::new(store.clone(), upstream.clone());

        let outcome = service.lookup(TEST_VIN).await.unwrap();

        assert_eq!(outcome.vehicle, peterbilt());
        assert!(!outcome.from_cache);
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get_by_vin(TEST_VIN).await.unwrap(), Some(peterbilt()));
    }

    #[tokio::test]
    async fn test_lookup_vehicle_in_cache() {
        let store = sqlite_store().await;
        let upstream = Arc::new(FakeUpstream::new(test_lookup_response()));
        let service = VinLookupService::new(store, upstream.clone());

        service.lookup(TEST_VIN).await.unwrap();
        let outcome = service.lookup(TEST_VIN).await.unwrap();

        assert_eq!(outcome.vehicle, peterbilt());
        assert!(outcome.from_cache);
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lookup_extract_failure_caches_nothing() {
        let store = sqlite_store().await;
        let upstream = Arc::new(FakeUpstream::new(json!({})));
        let service = VinLookupService::new(store.clone(), upstream);

        let err = service.lookup(TEST_VIN).await.unwrap_err();

        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_upstream_failure_propagates() {
        let store = sqlite_store().await;
        let service = VinLookupService::new(store.clone(), Arc::new(FailingUpstream));

        let err = service.lookup(TEST_VIN).await.unwrap_err();

        assert!(matches!(err, AppError::UpstreamStatus(500)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_duplicate_vin_propagates() {
        let inner = sqlite_store().await;
        inner.create(peterbilt()).await.unwrap();
        let store = Arc::new(RacingStore::new(inner));
        let upstream = Arc::new(FakeUpstream::new(test_lookup_response()));
        let service = VinLookupService::new(store.clone(), upstream.clone());

        let err = service.lookup(TEST_VIN).await.unwrap_err();

        assert!(matches!(err, AppError::DuplicateVin(ref vin) if vin == TEST_VIN));
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_vehicle_success() {
        let store = sqlite_store().await;
        let service = VinLookupService::new(
            store.clone(),
            Arc::new(FakeUpstream::new(test_lookup_response())),
        );
        store.create(peterbilt()).await.unwrap();

        assert!(service.remove(TEST_VIN).await.unwrap());
        assert!(service.cached(TEST_VIN).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_vehicle_not_cached_reports_success() {
        let service = VinLookupService::new(
            sqlite_store().await,
            Arc::new(FakeUpstream::new(test_lookup_response())),
        );

        assert!(service.remove(TEST_VIN).await.unwrap());
        assert!(service.remove(TEST_VIN).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_vehicle_fail() {
        let store = Arc::new(StickyStore {
            vehicles: Mutex::new(vec![peterbilt()]),
        });
        let service = VinLookupService::new(
            store,
            Arc::new(FakeUpstream::new(test_lookup_response())),
        );

        assert!(!service.remove(TEST_VIN).await.unwrap());
    }
}
