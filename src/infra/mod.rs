//! Adapters for the remote endpoints plus process-level plumbing.

pub mod auth;
pub mod client;
pub mod error;
pub mod graphql;
pub mod telemetry;
pub mod uploads;
