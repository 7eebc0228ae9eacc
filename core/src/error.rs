//! Error type for the Jira client.
//!
//! # Design
//! Every failure surfaces as a `JiraClientError`. `Exchange` is raised by the
//! response validator and carries everything known about the failed
//! exchange. Completed exchanges with a 4xx/5xx status are not errors on
//! their own; only the operations that look for a specific status turn a
//! mismatch into `Message`.

use thiserror::Error;

use crate::http::HttpResponse;

#[derive(Debug, Error)]
pub enum JiraClientError {
    /// The transport did not complete the exchange, or captured an error
    /// while executing it.
    #[error("Response status: {response_status}\nHTTP response: {status}\nDescription: {description}\nInner Content: {content}")]
    Exchange {
        response_status: String,
        status: u16,
        description: String,
        content: String,
    },

    /// A completed exchange that violates an operation's contract.
    #[error("{0}")]
    Message(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl JiraClientError {
    pub fn message(msg: impl Into<String>) -> Self {
        JiraClientError::Message(msg.into())
    }

    pub(crate) fn exchange(response: &HttpResponse) -> Self {
        let content = match &response.error {
            Some(err) if response.body.is_empty() => err.clone(),
            _ => response.body.clone(),
        };
        JiraClientError::Exchange {
            response_status: response.response_status.to_string(),
            status: response.status,
            description: response.status_description.clone(),
            content,
        }
    }
}

pub type Result<T> = std::result::Result<T, JiraClientError>;
