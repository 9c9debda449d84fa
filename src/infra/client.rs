//! Shared HTTP plumbing for the remote feed endpoints.

use std::sync::Arc;

use reqwest::Client;
use reqwest::header::HeaderValue;
use url::Url;

use crate::application::error::FeedError;

use super::auth::TokenSource;

#[derive(Clone)]
pub struct HttpContext {
    client: Client,
    base: Url,
    tokens: Arc<dyn TokenSource>,
}

impl HttpContext {
    /// Build a context rooted at `base`. No request timeout is configured: a
    /// call resolves, fails, or stays pending.
    pub fn new(base: &Url, tokens: Arc<dyn TokenSource>) -> Result<Self, FeedError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| FeedError::network(format!("failed to build http client: {err}")))?;
        Ok(Self {
            client,
            base,
            tokens,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("postfeed/", env!("CARGO_PKG_VERSION"))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn auth_header(&self) -> Result<HeaderValue, FeedError> {
        HeaderValue::from_str(&format!("Bearer {}", self.tokens.bearer_token()))
            .map_err(|e| FeedError::invalid_input(format!("bearer token is not header-safe: {e}")))
    }

    pub fn url(&self, path: &str) -> Result<Url, FeedError> {
        self.base
            .join(path)
            .map_err(|e| FeedError::invalid_input(format!("invalid endpoint path `{path}`: {e}")))
    }
}

/// Map a transport-level reqwest failure onto the feed taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> FeedError {
    if err.is_decode() {
        FeedError::protocol(err.to_string())
    } else {
        FeedError::network(err.to_string())
    }
}
