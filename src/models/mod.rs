//! Modelos del sistema
//!
//! Este módulo contiene el modelo de vehículo que mapea exactamente
//! a la tabla `vehicle` y los tipos de la respuesta de vPIC.

pub mod vehicle;
pub mod vpic;

pub use vehicle::{is_valid_vin, Vehicle, VehicleRow, VIN_REGEX};
