//! Clients - HTTP Clients for External APIs
//!
//! This module contains HTTP clients for communicating with external APIs.

pub mod vpic_client;

// Re-export main types for convenience
pub use vpic_client::{VehicleLookupClient, VpicClient};
