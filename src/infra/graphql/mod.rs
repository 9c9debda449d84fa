//! GraphQL adapter: one JSON document POSTed to `{base}/graphql` per call.
//!
//! A call succeeds when the response is 2xx and carries no `errors` array.
//! The first error entry decides the failure: `422` is a validation error,
//! `403` an authorization error, `404` a missing record, anything else a
//! generic query or mutation failure.

pub mod documents;
mod feed;
pub mod models;
mod status;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::application::error::FeedError;

use super::client::{HttpContext, transport_error};
use documents::{Operation, OperationKind};
use models::{GraphqlErrorEntry, GraphqlRequest, GraphqlResponse};

const GRAPHQL_PATH: &str = "graphql";

#[derive(Clone)]
pub struct GraphqlClient {
    ctx: HttpContext,
}

impl GraphqlClient {
    pub fn new(ctx: HttpContext) -> Self {
        Self { ctx }
    }

    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        variables: Value,
    ) -> Result<T, FeedError> {
        let url = self.ctx.url(GRAPHQL_PATH)?;
        let body = GraphqlRequest {
            query: operation.document,
            variables,
        };

        debug!(operation = operation.name, "Sending GraphQL request");
        let resp = self
            .ctx
            .client()
            .post(url)
            .header(AUTHORIZATION, self.ctx.auth_header()?)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(transport_error)?;
        let envelope: GraphqlResponse = serde_json::from_slice(&bytes).map_err(|e| {
            FeedError::protocol(format!(
                "{} returned an unreadable body (status {status}): {e}",
                operation.name
            ))
        })?;

        if let Some(first) = envelope.errors.as_ref().and_then(|errors| errors.first()) {
            return Err(map_error_entry(operation, first));
        }
        if !status.is_success() {
            return Err(FeedError::protocol(format!(
                "{} returned status {status} without an errors array",
                operation.name
            )));
        }

        let data = envelope.data.ok_or_else(|| {
            FeedError::protocol(format!("{} response is missing `data`", operation.name))
        })?;
        serde_json::from_value(data).map_err(|e| {
            FeedError::protocol(format!(
                "{} response is missing expected fields: {e}",
                operation.name
            ))
        })
    }
}

fn map_error_entry(operation: Operation, entry: &GraphqlErrorEntry) -> FeedError {
    let message = entry
        .message
        .clone()
        .unwrap_or_else(|| format!("{} failed", operation.name));

    match entry.status_code() {
        Some(422) => FeedError::Validation(message),
        Some(403) => FeedError::Authorization(message),
        Some(404) => FeedError::NotFound(message),
        _ => match operation.kind {
            OperationKind::Query => FeedError::Query(message),
            OperationKind::Mutation => FeedError::Mutation(message),
        },
    }
}
