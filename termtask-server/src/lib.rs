//! `TermTask` task service library.
//!
//! Exposes the HTTP task service for use in tests and embedding. The
//! service keeps the collection in memory and serves the JSON REST API
//! the TUI client persists through.

pub mod config;
pub mod routes;
pub mod store;
