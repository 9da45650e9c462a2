//! Domain model for trendwatch
//!
//! This module contains core domain types and errors that provide:
//! - One vocabulary for triggers and notification severities
//! - Structured error handling for the network gateway

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use errors::GatewayError;
pub use types::{Severity, Trigger};
