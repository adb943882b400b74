//! Módulo de base de datos
//!
//! Maneja la conexión y el schema de SQLite

pub mod connection;

pub use connection::DatabaseConnection;
