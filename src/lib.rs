//! Backend for the Bharatvayu air quality dashboard.
//!
//! The service synthesizes current readings, multi-day forecasts, a 48h
//! timeline and a ranked city table from injected randomness, and proxies
//! health advisories and chat to an external language model. Nothing is
//! persisted between requests.
//!
//! Modules follow the Explicit Module Boundary Pattern (EMBP): `routes`
//! talks to `generate` and `advisor` only through the names re-exported by
//! their `mod.rs`, and siblings reach shared types through this crate root.

pub mod advisor;
pub mod config;
pub mod error;
pub mod generate;
pub mod models;
pub mod routes;

pub use config::Config;
pub use error::ApiError;
