//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan el flujo cache-aside de lookup, la extracción
//! de respuestas de vPIC y la exportación del cache.

pub mod export_service;
pub mod lookup_service;
pub mod response_extractor;

pub use export_service::ExportService;
pub use lookup_service::{LookupOutcome, VinLookupService};
