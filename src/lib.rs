#![deny(missing_docs)]

//! Core library for the car registry service.

/// HTTP routing and REST handlers.
pub mod api;
/// HTTP client for a running registry server.
pub mod client;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Registration and lookup counters.
pub mod metrics;
/// Record type and the in-memory registry.
pub mod registry;
