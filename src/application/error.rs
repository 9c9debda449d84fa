use thiserror::Error;

use crate::{config::LoadError, infra::error::InfraError};

/// Failures surfaced by the remote collaborators and the feed controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Protocol(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not authorized: {0}")]
    Authorization(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("mutation failed: {0}")]
    Mutation(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl FeedError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Stable label for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Network(_) => "network",
            FeedError::Protocol(_) => "protocol",
            FeedError::Validation(_) => "validation",
            FeedError::Authorization(_) => "authorization",
            FeedError::NotFound(_) => "not_found",
            FeedError::Mutation(_) => "mutation",
            FeedError::Query(_) => "query",
            FeedError::InvalidInput(_) => "invalid_input",
        }
    }
}

/// The single displayed error. Last write wins; dismissing clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    current: Option<FeedError>,
}

impl ErrorSlot {
    pub fn current(&self) -> Option<&FeedError> {
        self.current.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn set(&mut self, error: FeedError) {
        self.current = Some(error);
    }

    pub(crate) fn dismiss(&mut self) -> Option<FeedError> {
        self.current.take()
    }
}

/// Process-level failure reported by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Feed(#[from] FeedError),
}
