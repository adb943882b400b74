use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{Vehicle, VIN_REGEX};
use crate::services::LookupOutcome;

// VIN recibido en el path de /lookup y /remove
#[derive(Debug, Deserialize, Validate)]
pub struct VinPath {
    #[validate(regex(
        path = "VIN_REGEX",
        code = "vin",
        message = "VIN must be exactly 17 uppercase alphanumeric characters"
    ))]
    pub vin: String,
}

// Response de GET /lookup/{vin}
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LookupResponse {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub model_year: String,
    pub body_class: String,
    pub from_cache: bool,
}

// Response de DELETE /remove/{vin}
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RemoveResponse {
    pub vin: String,
    pub removal_success: bool,
}

impl LookupResponse {
    pub fn new(vehicle: &Vehicle, from_cache: bool) -> Self {
        Self {
            vin: vehicle.vin().to_string(),
            make: vehicle.make().to_string(),
            model: vehicle.model().to_string(),
            model_year: vehicle.model_year().to_string(),
            body_class: vehicle.body_class().to_string(),
            from_cache,
        }
    }
}

impl From<LookupOutcome> for LookupResponse {
    fn from(outcome: LookupOutcome) -> Self {
        Self::new(&outcome.vehicle, outcome.from_cache)
    }
}
