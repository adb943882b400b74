//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle validado y la fila de base de datos
//! desde la que se reconstruye. Mapea exactamente a la tabla `vehicle`
//! con primary key `vin`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;

use crate::utils::errors::AppError;

/// Año del primer automóvil con patente
pub const MIN_MODEL_YEAR: i32 = 1886;
pub const MAX_MODEL_YEAR: i32 = 9999;

lazy_static! {
    /// Exactamente 17 caracteres alfanuméricos en mayúsculas
    pub static ref VIN_REGEX: Regex = Regex::new(r"^[A-Z0-9]{17}$").unwrap();
}

/// Validar formato de VIN
pub fn is_valid_vin(vin: &str) -> bool {
    VIN_REGEX.is_match(vin)
}

/// Vehicle principal - solo se construye a través de `Vehicle::new`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    body_class: String,
    make: String,
    model: String,
    model_year: String,
    vin: String,
}

impl Vehicle {
    /// Crear un vehículo validando VIN y año del modelo
    pub fn new(
        body_class: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        model_year: impl Into<String>,
        vin: impl Into<String>,
    ) -> Result<Self, AppError> {
        let vin = vin.into();
        if !is_valid_vin(&vin) {
            return Err(AppError::InvalidVin(vin));
        }

        let model_year = model_year.into();
        match model_year.parse::<i32>() {
            Ok(year) if (MIN_MODEL_YEAR..=MAX_MODEL_YEAR).contains(&year) => {}
            _ => return Err(AppError::InvalidModelYear(model_year)),
        }

        Ok(Self {
            body_class: body_class.into(),
            make: make.into(),
            model: model.into(),
            model_year,
            vin,
        })
    }

    pub fn body_class(&self) -> &str {
        &self.body_class
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn model_year(&self) -> &str {
        &self.model_year
    }

    pub fn vin(&self) -> &str {
        &self.vin
    }
}

/// Fila cruda de la tabla `vehicle`
#[derive(Debug, Clone, FromRow)]
pub struct VehicleRow {
    pub body_class: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub model_year: Option<String>,
    pub vin: String,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Vehicle::new(
            row.body_class.unwrap_or_default(),
            row.make.unwrap_or_default(),
            row.model.unwrap_or_default(),
            row.model_year.unwrap_or_default(),
            row.vin,
        )
    }
}
