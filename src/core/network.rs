//! Backend request plumbing
//!
//! This module provides:
//! - `Transport`, the seam between the dashboard and the wire
//! - `HttpTransport`, the reqwest-backed implementation
//! - `NetworkClient`, which parses bodies defensively and turns non-success
//!   statuses into `NetworkError::Api` with a human-readable detail

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("backend unreachable: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Parse(String),

    /// Reachable backend, non-success status
    #[error("{detail}")]
    Api { status: u16, detail: String },
}

impl From<reqwest::Error> for NetworkError {
    fn from(error: reqwest::Error) -> Self {
        NetworkError::Transport(error.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A file attached to a multipart request
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    /// URL-encoded form fields
    Form(Vec<(String, String)>),
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<FilePart>,
    },
    Json(Value),
}

/// Transport-neutral description of one backend call
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Body,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: Body::Empty,
        }
    }

    pub fn post(path: impl Into<String>, body: Body) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body,
        }
    }

    /// Value of a form or multipart text field
    pub fn field(&self, name: &str) -> Option<&str> {
        let fields = match &self.body {
            Body::Form(fields) | Body::Multipart { fields, .. } => fields,
            Body::Empty | Body::Json(_) => return None,
        };
        fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Status and undecoded body of a completed call
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one request and hands back the raw response
///
/// Implementations do not interpret status codes; that is the client's job.
pub trait Transport {
    fn execute(&self, request: ApiRequest) -> impl Future<Output = Result<RawResponse>>;
}

/// reqwest-backed transport rooted at the backend base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        // No timeouts: in-flight calls are never aborted
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = self.url(&request.path);
        log::debug!("{:?} {url}", request.method);

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let builder = match request.body {
            Body::Empty => builder,
            Body::Form(fields) => builder.form(&fields),
            Body::Json(value) => builder.json(&value),
            Body::Multipart { fields, files } => {
                let mut form = reqwest::multipart::Form::new();
                for (key, value) in fields {
                    form = form.text(key, value);
                }
                for file in files {
                    let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
                    form = form.part(file.field, part);
                }
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("{url} -> {status} ({} bytes)", body.len());
        Ok(RawResponse { status, body })
    }
}

/// Parse a body as JSON, treating an empty body as `null`
fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return Some(Value::Null);
    }
    serde_json::from_str(body).ok()
}

/// Human-readable message for a failed response
///
/// A string `detail` wins; otherwise the JSON itself; otherwise the status.
pub fn failure_detail(status: u16, body: &str) -> String {
    match parse_body(body) {
        Some(Value::Object(object)) => match object.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(detail) => detail.to_string(),
            None => Value::Object(object).to_string(),
        },
        Some(Value::Null) | None => format!("HTTP {status}"),
        Some(other) => other.to_string(),
    }
}

/// Issues requests through a transport and decodes the results
#[derive(Debug)]
pub struct NetworkClient<T> {
    transport: T,
}

impl<T: Transport> NetworkClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform a request and return its JSON body
    pub async fn request_json(&self, request: ApiRequest) -> Result<Value> {
        let path = request.path.clone();
        let response = self.transport.execute(request).await?;

        if !response.is_success() {
            let detail = failure_detail(response.status, &response.body);
            log::warn!("{path} failed with {}: {detail}", response.status);
            return Err(NetworkError::Api {
                status: response.status,
                detail,
            });
        }

        parse_body(&response.body)
            .ok_or_else(|| NetworkError::Parse(format!("{path} returned a non-JSON body")))
    }

    /// Perform a request and decode its body into `D`
    pub async fn request<D: DeserializeOwned>(&self, request: ApiRequest) -> Result<D> {
        let path = request.path.clone();
        let value = self.request_json(request).await?;
        serde_json::from_value(value).map_err(|error| NetworkError::Parse(format!("{path}: {error}")))
    }
}
