//! postfeed: a paginated post feed with a bounded local window kept
//! consistent with a remote GraphQL store.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
