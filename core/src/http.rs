//! HTTP transport types and the blocking transport seam.
//!
//! # Design
//! Requests and responses are plain data. Endpoints build an `HttpRequest`,
//! hand it to a `Transport`, and interpret the returned `HttpResponse`
//! themselves, so status handling lives in one place and tests can swap the
//! network for a scripted fake. `UreqTransport` is the default blocking
//! implementation.

use std::fmt;
use std::time::Duration;

use crate::error::{BasecampError, BasecampResult};

/// Content type sent with every JSON request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a create or replace call.
///
/// Everything is JSON except binary uploads, which travel verbatim with the
/// caller's media type.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Raw { bytes: Vec<u8>, media_type: String },
}

impl RequestBody {
    /// Serializes any `Serialize` value into a JSON body.
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> BasecampResult<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    pub fn raw(bytes: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self::Raw {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }

    /// Encoded bytes plus the content type they must be sent with.
    pub(crate) fn encode(self) -> BasecampResult<(Vec<u8>, String)> {
        match self {
            Self::Json(value) => Ok((serde_json::to_vec(&value)?, JSON_CONTENT_TYPE.to_string())),
            Self::Raw { bytes, media_type } => Ok((bytes, media_type)),
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Returns the value of the first header named `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Executes requests on behalf of the client.
///
/// Implementations must return every HTTP status as data; only failures that
/// produce no response at all should surface as `BasecampError::Transport`.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> BasecampResult<HttpResponse>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Transport whose calls fail once `timeout` elapses.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn decorate<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> BasecampResult<HttpResponse> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => decorate(self.agent.get(url), &request).call(),
            HttpMethod::Delete => decorate(self.agent.delete(url), &request).call(),
            HttpMethod::Post => {
                let builder = decorate(self.agent.post(url), &request);
                match &request.body {
                    Some(body) => builder.send(body.as_slice()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = decorate(self.agent.put(url), &request);
                match &request.body {
                    Some(body) => builder.send(body.as_slice()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| BasecampError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| BasecampError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
