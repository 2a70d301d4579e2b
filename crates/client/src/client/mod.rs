// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request dispatcher: the single entry point every API call goes through.

pub mod interceptor;
pub mod refresh;

use std::sync::Arc;
use std::task::Poll;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::events::{SessionEvent, EVENT_CAPACITY};
use crate::token::TokenStore;
use crate::transport::{FilePart, Method, RequestBody, RequestContext, ReqwestTransport, Transport};
use crate::wire::{Envelope, ListParams, Page};

use self::interceptor::Verdict;
use self::refresh::{RefreshCoordinator, Replay};

/// Per-call options for [`ApiClient::send`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    /// Treat a 401 as final instead of refreshing (login, logout).
    pub skip_refresh: bool,
}

impl RequestOptions {
    pub fn query(query: Vec<(String, String)>) -> Self {
        Self { query, ..Self::default() }
    }
}

struct Inner {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    refresh: RefreshCoordinator,
    events: broadcast::Sender<SessionEvent>,
}

/// Authenticated API client. Cheap to clone; clones share tokens and the
/// refresh gate.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl ApiClient {
    /// Client talking HTTP to `config.api_url`.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), tokens))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let refresh = RefreshCoordinator::new(events.clone());
        Self { inner: Arc::new(Inner { transport, tokens, refresh, events }) }
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.inner.tokens.as_ref()
    }

    /// Subscribe to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        let _ = self.inner.events.send(event);
    }

    /// Whether a token refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.inner.refresh.is_refreshing()
    }

    /// Requests currently parked behind the in-flight refresh.
    pub fn queued_behind_refresh(&self) -> usize {
        self.inner.refresh.queued()
    }

    /// Run `req` through the full pipeline and return the raw success body.
    pub async fn execute(&self, mut req: RequestContext) -> Result<Bytes, ApiError> {
        interceptor::authorize(self.tokens(), &mut req);
        tracing::debug!(method = req.method.as_str(), path = %req.path, "api request");

        let resp = self.inner.transport.execute(&req).await?;
        match interceptor::inspect(&req, resp) {
            Verdict::Success(body) => Ok(body),
            Verdict::Failed(err) => Err(err),
            Verdict::Unauthorized(err) => {
                req.retried = true;
                // The token was replaced while this request was in flight.
                if let Some(current) = self.tokens().access_token() {
                    if req.bearer.as_deref() != Some(current.as_str()) {
                        return self.replay(req, Replay::immediate(current)).await;
                    }
                }
                let replay = self
                    .inner
                    .refresh
                    .recover(self.inner.transport.as_ref(), self.tokens(), err)
                    .await?;
                self.replay(req, replay).await
            }
        }
    }

    /// Resend a request once with a fresh token. A second 401 is final.
    ///
    /// The next queued replay may dispatch as soon as this one has been
    /// handed to the transport.
    async fn replay(&self, mut req: RequestContext, replay: Replay) -> Result<Bytes, ApiError> {
        let Replay { token, mut turn } = replay;
        req.bearer = Some(token);
        turn.wait().await;
        tracing::debug!(method = req.method.as_str(), path = %req.path, "replaying after refresh");

        let mut send = self.inner.transport.execute(&req);
        let first = futures_util::poll!(&mut send);
        turn.pass();
        let resp = match first {
            Poll::Ready(resp) => resp,
            Poll::Pending => send.await,
        }?;
        match interceptor::inspect(&req, resp) {
            Verdict::Success(body) => Ok(body),
            Verdict::Failed(err) | Verdict::Unauthorized(err) => Err(err),
        }
    }

    /// Run `req` and decode the full response envelope.
    pub async fn send_enveloped(&self, req: RequestContext) -> Result<Envelope<Value>, ApiError> {
        let body = self.execute(req).await?;
        decode_envelope(&body)
    }

    /// Issue a JSON request and return the envelope's `data`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let mut req = RequestContext::new(method, path).query(options.query);
        if let Some(body) = body {
            req = req.json(body);
        }
        req.skip_refresh = options.skip_refresh;
        Ok(self.send_enveloped(req).await?.data)
    }

    async fn call<T: DeserializeOwned>(&self, req: RequestContext) -> Result<T, ApiError> {
        let data = self.send_enveloped(req).await?.data;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call(RequestContext::new(Method::Get, path)).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        self.call(RequestContext::new(Method::Get, path).query(query)).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        self.call(RequestContext::new(Method::Post, path).json(serde_json::to_value(body)?)).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        self.call(RequestContext::new(Method::Put, path).json(serde_json::to_value(body)?)).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        self.call(RequestContext::new(Method::Patch, path).json(serde_json::to_value(body)?)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call(RequestContext::new(Method::Delete, path)).await
    }

    pub async fn delete_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        self.call(RequestContext::new(Method::Delete, path).query(query)).await
    }

    /// Fetch one page of a list endpoint.
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<Page<T>, ApiError> {
        let req = RequestContext::new(Method::Get, path).query(params.to_query());
        let envelope = self.send_enveloped(req).await?;
        let items: Vec<T> = serde_json::from_value(envelope.data)?;
        Ok(Page { items, meta: envelope.meta })
    }

    /// Multipart upload. Parts are kept in memory so the request can replay.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: Vec<FilePart>,
    ) -> Result<T, ApiError> {
        self.call(RequestContext::new(Method::Post, path).body(RequestBody::Multipart(parts))).await
    }
}

/// Decode a success body. An empty body (204) is an envelope with `null` data.
fn decode_envelope(body: &[u8]) -> Result<Envelope<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Envelope { success: true, message: String::new(), data: Value::Null, meta: None });
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
