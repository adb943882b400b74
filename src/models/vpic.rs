//! Modelos de la API vPIC (NHTSA)
//!
//! Forma de la respuesta de `DecodeVin`. Solo se tipan los campos que
//! el extractor necesita; el resto del payload se ignora.

use serde::{Deserialize, Serialize};

/// Prefijo de `SearchCriteria` en las respuestas de DecodeVin
pub const SEARCH_CRITERIA_PREFIX: &str = "VIN:";

/// Variables de `Results` que se copian al Vehicle
pub const VARIABLE_MAKE: &str = "Make";
pub const VARIABLE_MODEL: &str = "Model";
pub const VARIABLE_MODEL_YEAR: &str = "Model Year";
pub const VARIABLE_BODY_CLASS: &str = "Body Class";

/// Una entrada de `Results`: `{Variable, Value}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpicResult {
    #[serde(rename = "Variable", default)]
    pub variable: Option<String>,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}
