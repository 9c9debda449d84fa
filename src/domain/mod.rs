//! Domain layer types and invariants.

pub mod posts;
pub mod window;
