//! Typed client core for the Jira REST API v2.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `JiraService` puts a
//! `Transport` in between for callers who want one call per operation;
//! `UreqTransport` is the blocking transport behind the `ureq` feature.
//!
//! # Design
//! - `JiraClient` is stateless: it holds only the immutable `JiraConfig`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Completed exchanges are decoded whatever their status; only a failed
//!   exchange, a contract violation or a codec error is a `JiraClientError`.
//! - Resource paths live in `urls`, DTOs in `models`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod service;
pub mod transport;
pub mod urls;

pub use client::{fields_to_string, validate_response, JiraClient};
pub use config::JiraConfig;
pub use error::{JiraClientError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseStatus};
pub use models::{
    ApplicationProperty, Attachment, Author, BasicIssue, CreateIssue, FieldValue, Fields, Issue, IssueType, Issues,
    NewVersion, Priority, Project, ProjectMeta, Status, UpdateVersion, Version,
};
pub use service::JiraService;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use transport::Transport;
