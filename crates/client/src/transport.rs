// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-level request execution.
//!
//! A [`RequestContext`] is a complete, replayable description of one API
//! call. A [`Transport`] turns it into a [`RawResponse`] without judging the
//! status code; status handling belongs to the interceptor.

use std::sync::Once;
use std::time::Duration;

use bytes::Bytes;
use futures_util::future::BoxFuture;

use crate::config::ClientConfig;
use crate::error::{ApiError, NETWORK_ERROR};

/// HTTP verbs used by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::str::FromStr for Method {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => anyhow::bail!("unsupported method: {other}"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One file in a multipart upload, held in memory so the request can be
/// replayed after a token refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name (`image`, `images`, `avatar`, `photo`).
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl FilePart {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FilePart>),
}

/// A replayable API request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub method: Method,
    /// Path relative to the API base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Bearer credential attached by the interceptor.
    pub bearer: Option<String>,
    /// Set once the request has been replayed after a token refresh.
    pub retried: bool,
    /// A 401 on this request is final (login, logout, refresh).
    pub skip_refresh: bool,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
            retried: false,
            skip_refresh: false,
        }
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn json(self, value: serde_json::Value) -> Self {
        self.body(RequestBody::Json(value))
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn skip_refresh(mut self) -> Self {
        self.skip_refresh = true;
        self
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes requests against the API.
///
/// Any response, including 4xx/5xx, is `Ok`. `Err` means no response at all
/// and is always [`ApiError::Transport`].
pub trait Transport: Send + Sync {
    fn execute<'a>(&'a self, req: &'a RequestContext) -> BoxFuture<'a, Result<RawResponse, ApiError>>;
}

static CRYPTO_INIT: Once = Once::new();

/// Install the ring crypto provider for reqwest/rustls.
/// Safe to call multiple times, only the first call has effect.
pub fn ensure_crypto() {
    CRYPTO_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// [`Transport`] backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        ensure_crypto();

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .cookie_store(true)
            .build()?;
        Ok(Self { base_url: config.base_url().to_owned(), timeout: config.timeout(), client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_error(&self, e: &reqwest::Error) -> ApiError {
        tracing::debug!(err = %e, "request failed without response");
        if e.is_timeout() {
            ApiError::transport(format!("timeout of {}ms exceeded", self.timeout.as_millis()))
        } else {
            ApiError::transport(NETWORK_ERROR)
        }
    }
}

fn build_form(parts: &[FilePart]) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        let file = reqwest::multipart::Part::bytes(part.data.to_vec())
            .file_name(part.file_name.clone())
            .mime_str(&part.content_type)
            .map_err(|e| ApiError::transport(format!("invalid content type: {e}")))?;
        form = form.part(part.field.clone(), file);
    }
    Ok(form)
}

impl Transport for ReqwestTransport {
    fn execute<'a>(&'a self, req: &'a RequestContext) -> BoxFuture<'a, Result<RawResponse, ApiError>> {
        Box::pin(async move {
            let mut builder = self.client.request(req.method.into(), self.url(&req.path));
            if !req.query.is_empty() {
                builder = builder.query(&req.query);
            }
            if let Some(ref token) = req.bearer {
                builder = builder.bearer_auth(token);
            }
            builder = match req.body {
                RequestBody::Empty => builder,
                RequestBody::Json(ref value) => builder.json(value),
                RequestBody::Multipart(ref parts) => builder.multipart(build_form(parts)?),
            };

            let resp = builder.send().await.map_err(|e| self.map_error(&e))?;
            let status = resp.status().as_u16();
            let body = resp.bytes().await.map_err(|e| self.map_error(&e))?;
            Ok(RawResponse { status, body })
        })
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
