//! Executing `HttpRequest`s.
//!
//! `Transport` is the seam between the deterministic client and the network.
//! `UreqTransport` is the blocking implementation; tests substitute scripted
//! transports.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one request and returns the response as data.
///
/// Non-2xx statuses are responses, not errors; only failures that leave no
/// response behind (DNS, connection, broken body) are `Err`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport over a shared `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        // Status interpretation belongs to `TodoClient`.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "executing request");
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = ureq::http::Request::builder()
            .method(method.as_str())
            .uri(url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let result = match body {
            Some(body) => builder.body(body).map(|req| self.agent.run(req)),
            None => builder.body(()).map(|req| self.agent.run(req)),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}
