//! Coverage gap analysis for property and casualty insurance policies.
//!
//! The [`analysis`] module holds the deterministic pipeline (risk lookup, underwriting
//! rules, gap synthesis, aggregation) along with the HTTP router and service facade
//! built on top of it. Configuration, telemetry, and the application error type live
//! alongside so binaries can share them.

pub mod analysis;
pub mod config;
pub mod error;
pub mod telemetry;
