//! Extractor de respuestas de vPIC
//!
//! Convierte el payload crudo de `DecodeVin` en un `Vehicle` validado.
//! Es una transformación pura: no registra logs ni toca el store.

use serde_json::Value;

use crate::models::vehicle::Vehicle;
use crate::models::vpic::{
    VpicResult, SEARCH_CRITERIA_PREFIX, VARIABLE_BODY_CLASS, VARIABLE_MAKE, VARIABLE_MODEL,
    VARIABLE_MODEL_YEAR,
};
use crate::utils::errors::{malformed_response_error, missing_field_error, AppError};

/// Campos capturados de `Results` antes de construir el Vehicle
#[derive(Debug, Default)]
struct ExtractedFields {
    make: String,
    model: String,
    model_year: String,
    body_class: String,
}

/// Extraer un Vehicle de una respuesta de DecodeVin
pub fn extract(raw: &Value) -> Result<Vehicle, AppError> {
    let object = match raw {
        Value::Object(map) if !map.is_empty() => map,
        Value::Object(_) | Value::Null => {
            return Err(malformed_response_error("Response is empty or missing"))
        }
        _ => return Err(malformed_response_error("Response is not a JSON object")),
    };

    let search_criteria = object
        .get("SearchCriteria")
        .ok_or_else(|| missing_field_error("SearchCriteria"))?
        .as_str()
        .ok_or_else(|| malformed_response_error("SearchCriteria is not a string"))?;
    let vin = search_criteria
        .strip_prefix(SEARCH_CRITERIA_PREFIX)
        .unwrap_or(search_criteria);

    let results = object
        .get("Results")
        .ok_or_else(|| missing_field_error("Results"))?
        .as_array()
        .ok_or_else(|| malformed_response_error("Results is not an array"))?;

    let mut fields = ExtractedFields::default();
    for entry in results {
        // Entradas con otra forma no aportan ninguna de las variables buscadas
        let Ok(result) = serde_json::from_value::<VpicResult>(entry.clone()) else {
            continue;
        };
        let Some(variable) = result.variable.as_deref() else {
            continue;
        };
        let value = result.value.clone().unwrap_or_default();

        match variable {
            VARIABLE_MAKE => fields.make = value,
            VARIABLE_MODEL => fields.model = value,
            VARIABLE_MODEL_YEAR => fields.model_year = value,
            VARIABLE_BODY_CLASS => fields.body_class = value,
            _ => {}
        }
    }

    Vehicle::new(
        fields.body_class,
        fields.make,
        fields.model,
        fields.model_year,
        vin,
    )
}
