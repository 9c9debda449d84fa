//! Bearer credential supplied by the session layer.

use std::fs;
use std::path::Path;

use super::error::InfraError;

/// Supplies the bearer token attached to every request. Consulted per
/// request, so an implementation may rotate the credential between calls.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> String;
}

#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> String {
        self.0.clone()
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(..)")
    }
}

/// Resolve the token, preferring the token file over the inline value.
pub fn resolve_token(
    token_file: Option<&Path>,
    inline: Option<&str>,
) -> Result<StaticToken, InfraError> {
    let token = match token_file {
        Some(path) => fs::read_to_string(path)?.trim().to_string(),
        None => inline
            .map(|value| value.trim().to_string())
            .unwrap_or_default(),
    };

    if token.is_empty() {
        return Err(InfraError::configuration(
            "bearer token is required (use --token-file or POSTFEED_TOKEN)",
        ));
    }
    Ok(StaticToken::new(token))
}
