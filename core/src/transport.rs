//! The seam between request assembly and the network.
//!
//! # Design
//! A `Transport` turns an `HttpRequest` into an `HttpResponse` and never
//! fails out-of-band: a connection error or a timeout comes back as a
//! response whose `response_status` is not `Completed`. That keeps every
//! failure on the single path through `validate_response`.
//!
//! `UreqTransport` is the blocking implementation shipped with the crate
//! (feature `ureq`). Hosts with their own HTTP stack implement the trait.

use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> HttpResponse;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> HttpResponse {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::time::Duration;

    use tracing::debug;

    use super::Transport;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse, ResponseStatus};

    /// Blocking transport on a ureq `Agent`.
    ///
    /// 4xx/5xx responses are returned as data; ureq's status-as-error
    /// behaviour is switched off. Bodies are read whole, without ureq's
    /// default 10 MiB cap. A request's `timeout` overrides the agent's
    /// global timeout for that call.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl std::fmt::Debug for UreqTransport {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("UreqTransport").finish_non_exhaustive()
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::from_agent(build_agent(None))
        }

        /// Applies `timeout` to every call that does not carry its own.
        pub fn with_timeout(timeout: Duration) -> Self {
            Self::from_agent(build_agent(Some(timeout)))
        }

        /// Wrap an agent configured by the host. It must have
        /// `http_status_as_error(false)`, or 4xx/5xx surface as failed exchanges.
        pub fn from_agent(agent: ureq::Agent) -> Self {
            Self { agent }
        }
    }

    fn build_agent(timeout: Option<Duration>) -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent()
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> HttpResponse {
            let agent = &self.agent;
            let url = request.full_url();
            debug!(method = %request.method, %url, "sending request");

            let result = match request.method {
                HttpMethod::Get => prepare(agent.get(&url), request).call(),
                HttpMethod::Delete => prepare(agent.delete(&url), request).call(),
                HttpMethod::Post => send(prepare(agent.post(&url), request), request),
                HttpMethod::Put => send(prepare(agent.put(&url), request), request),
            };

            match result {
                Ok(mut response) => {
                    let status = response.status();
                    let headers = response
                        .headers()
                        .iter()
                        .filter_map(|(name, value)| {
                            value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
                        })
                        .collect();
                    let read = response.body_mut().with_config().limit(u64::MAX).read_to_string();
                    let (body, error) = match read {
                        Ok(body) => (body, None),
                        Err(e) => (String::new(), Some(e.to_string())),
                    };
                    debug!(status = status.as_u16(), "received response");
                    HttpResponse {
                        response_status: ResponseStatus::Completed,
                        status: status.as_u16(),
                        status_description: status.canonical_reason().unwrap_or_default().to_string(),
                        headers,
                        body,
                        error,
                    }
                }
                Err(e @ ureq::Error::Timeout(_)) => HttpResponse::failed(ResponseStatus::TimedOut, e.to_string()),
                Err(e) => HttpResponse::failed(ResponseStatus::Error, e.to_string()),
            }
        }
    }

    fn prepare<B>(builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
        let mut builder = match request.timeout {
            Some(timeout) => builder.config().timeout_global(Some(timeout)).build(),
            None => builder,
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    fn send(
        builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
        request: &HttpRequest,
    ) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        match &request.body {
            Some(body) => builder.send(body.as_bytes()),
            None => builder.send_empty(),
        }
    }
}
