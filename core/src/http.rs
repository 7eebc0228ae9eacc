//! HTTP exchange types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `JiraClient` builds `HttpRequest`
//! values and parses `HttpResponse` values; a `Transport` (or the host
//! application itself) performs the network round-trip in between.
//!
//! A transport never fails out-of-band. Whether the exchange completed is
//! recorded on the response itself (`response_status` and `error`), so the
//! validator can tell "the server answered 404" apart from "nothing came
//! back".

use std::fmt;
use std::time::Duration;

use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and carries no query string; query parameters live in
/// `query` in the order they were added and are encoded by `full_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Pass-through deadline for the transport. Never enforced by the core.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// The request URL with its query parameters percent-encoded and appended.
    ///
    /// Characters that may not appear in a URI path (a space in an issue key,
    /// say) are percent-encoded so the request still reaches the server.
    /// A `url` that does not parse as an absolute URL is used verbatim.
    pub fn full_url(&self) -> String {
        let query = (!self.query.is_empty()).then(|| {
            self.query
                .iter()
                .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
                .collect::<Vec<_>>()
                .join("&")
        });
        match Url::parse(&self.url) {
            Ok(mut url) => {
                url.set_query(query.as_deref());
                url.into()
            }
            Err(_) => match query {
                Some(query) => format!("{}?{query}", self.url),
                None => self.url.clone(),
            },
        }
    }

    /// Value of the first query parameter named `key`.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// How far a transport got with an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// A response (of any status code) was received.
    Completed,
    /// The transport failed before a response arrived.
    Error,
    TimedOut,
    Aborted,
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseStatus::Completed => "Completed",
            ResponseStatus::Error => "Error",
            ResponseStatus::TimedOut => "TimedOut",
            ResponseStatus::Aborted => "Aborted",
        };
        f.write_str(name)
    }
}

/// An HTTP response described as plain data.
///
/// `status` is 0 and `body` is empty when the exchange never completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub response_status: ResponseStatus,
    pub status: u16,
    /// Reason phrase, e.g. "No Content".
    pub status_description: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Error captured while executing the exchange, if any.
    pub error: Option<String>,
}

impl HttpResponse {
    /// A completed exchange with the given status and body.
    pub fn completed(status: u16, body: impl Into<String>) -> Self {
        Self {
            response_status: ResponseStatus::Completed,
            status,
            status_description: reason_phrase(status).to_string(),
            headers: Vec::new(),
            body: body.into(),
            error: None,
        }
    }

    /// An exchange that never produced a response.
    pub fn failed(response_status: ResponseStatus, error: impl Into<String>) -> Self {
        Self {
            response_status,
            status: 0,
            status_description: String::new(),
            headers: Vec::new(),
            body: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.response_status == ResponseStatus::Completed
    }
}

/// Canonical reason phrase for the status codes Jira commonly returns.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}
