//! Blocking GraphQL-over-HTTP client.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use ureq::Agent;

/// Errors surfaced by GraphQL requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success HTTP status.
    #[error("GraphQL request to {endpoint} failed with status {status}")]
    Status {
        /// Endpoint that was queried.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request never produced an HTTP response.
    #[error("GraphQL request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint that was queried.
        endpoint: String,
        /// Underlying transport error.
        #[source]
        source: ureq::Error,
    },
    /// The response body was not the expected JSON.
    #[error("Failed to decode GraphQL response: {0}")]
    Decode(#[source] ureq::Error),
    /// The server reported one or more GraphQL errors.
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQL(Vec<String>),
    /// The response had neither errors nor data.
    #[error("GraphQL response contained no data")]
    MissingData,
    /// No worker could be started to run the request.
    #[error("Failed to start request worker: {0}")]
    Worker(#[source] std::io::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQLRequest<'a, V> {
    query: &'a str,
    operation_name: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorEntry {
    message: String,
}

/// Client for a single GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    agent: Agent,
    endpoint: String,
    token: Option<String>,
}

impl GraphqlClient {
    /// Build a client for `endpoint` with a global request timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let config = ureq::config::Config::builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.new_agent(),
            endpoint: endpoint.into(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a named operation and decode its `data` payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server reports GraphQL errors,
    /// or the payload cannot be decoded.
    pub fn execute<V, T>(
        &self,
        operation_name: &str,
        query: &str,
        variables: V,
    ) -> Result<T, ApiError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        debug!(operation = operation_name, endpoint = %self.endpoint, "Sending GraphQL request");

        let body = GraphQLRequest {
            query,
            operation_name,
            variables,
        };

        let mut request = self
            .agent
            .post(&self.endpoint)
            .header("User-Agent", format!("modelprefs/{}", env!("CARGO_PKG_VERSION")));
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = match request.send_json(&body) {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(status)) => {
                return Err(ApiError::Status {
                    endpoint: self.endpoint.clone(),
                    status,
                });
            }
            Err(source) => {
                return Err(ApiError::Transport {
                    endpoint: self.endpoint.clone(),
                    source,
                });
            }
        };

        let envelope: GraphQLResponse<T> = response
            .into_body()
            .read_json()
            .map_err(ApiError::Decode)?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            return Err(ApiError::GraphQL(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        envelope.data.ok_or(ApiError::MissingData)
    }
}
