//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El store y el cliente vPIC se crean una vez
//! al arrancar y se inyectan aquí.

use std::sync::Arc;

use crate::clients::VehicleLookupClient;
use crate::config::environment::EnvironmentConfig;
use crate::repositories::vehicle_repository::VehicleStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VehicleStore>,
    pub upstream: Arc<dyn VehicleLookupClient>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn VehicleStore>,
        upstream: Arc<dyn VehicleLookupClient>,
        config: EnvironmentConfig,
    ) -> Self {
        Self {
            store,
            upstream,
            config,
        }
    }
}
