//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y tracing de requests.

pub mod cors;

pub use cors::*;
