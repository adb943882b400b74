//! Cliente HTTP para vPIC (NHTSA)
//!
//! Este módulo contiene el cliente de la API `DecodeVin` que se consulta
//! cuando un VIN no está en el cache.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::utils::errors::AppError;

/// Servicio externo de identificación de vehículos
#[async_trait]
pub trait VehicleLookupClient: Send + Sync {
    /// Devolver el payload crudo de la API para un VIN
    async fn decode_vin(&self, vin: &str) -> Result<Value, AppError>;
}

/// Cliente HTTP para la API vPIC
#[derive(Clone)]
pub struct VpicClient {
    client: Client,
    base_url: String,
}

impl VpicClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("VinCache/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn decode_vin_url(&self, vin: &str) -> String {
        format!("{}/vehicles/DecodeVin/{}", self.base_url, vin)
    }
}

#[async_trait]
impl VehicleLookupClient for VpicClient {
    async fn decode_vin(&self, vin: &str) -> Result<Value, AppError> {
        let url = self.decode_vin_url(vin);
        log::info!("🌐 Consultando vPIC: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("format", "json")])
            .send()
            .await?;

        let status = response.status();
        log::info!("📡 Response status: {}", status);

        if !status.is_success() {
            log::error!("❌ vPIC respondió {} para VIN {}", status, vin);
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let body = response.json::<Value>().await?;
        Ok(body)
    }
}
