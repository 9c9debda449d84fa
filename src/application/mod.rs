//! Feed engine: session state, navigation, reconciliation and the read paths.

pub mod detail;
pub mod error;
pub mod feed;
pub mod reconcile;
pub mod source;
pub mod state;
pub mod status;
