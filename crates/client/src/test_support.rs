// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test infrastructure: a scripted transport and a fake admin API.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::client::refresh::REFRESH_PATH;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::token::{MemoryTokenStore, TokenStore};
use crate::transport::{RawResponse, RequestBody, RequestContext, Transport};

type Handler = Box<dyn Fn(&RequestContext) -> Result<RawResponse, ApiError> + Send + Sync>;

/// Transport that records every request and answers from a handler.
///
/// With [`MockTransport::hold_refresh`], calls to the refresh endpoint park
/// until the returned [`Notify`] fires, so tests can pile up 401s behind an
/// in-flight refresh.
pub struct MockTransport {
    calls: Mutex<Vec<RequestContext>>,
    handler: Handler,
    refresh_gate: Option<Arc<Notify>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&RequestContext) -> Result<RawResponse, ApiError> + Send + Sync + 'static,
    ) -> Self {
        Self { calls: Mutex::new(Vec::new()), handler: Box::new(handler), refresh_gate: None }
    }

    pub fn hold_refresh(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.refresh_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn calls(&self) -> Vec<RequestContext> {
        self.calls.lock().clone()
    }

    /// Number of requests made to `path`.
    pub fn count(&self, path: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.path == path).count()
    }

    /// Paths of requests sent with `bearer`, in send order.
    pub fn paths_with_bearer(&self, bearer: &str) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.bearer.as_deref() == Some(bearer))
            .map(|c| c.path.clone())
            .collect()
    }
}

impl Transport for MockTransport {
    fn execute<'a>(&'a self, req: &'a RequestContext) -> BoxFuture<'a, Result<RawResponse, ApiError>> {
        Box::pin(async move {
            self.calls.lock().push(req.clone());
            if req.path == REFRESH_PATH {
                if let Some(ref gate) = self.refresh_gate {
                    gate.notified().await;
                }
            }
            (self.handler)(req)
        })
    }
}

/// 200 with the standard success envelope.
pub fn ok(data: Value) -> RawResponse {
    RawResponse::json(200, &json!({ "success": true, "message": "ok", "data": data }))
}

pub fn unauthorized() -> RawResponse {
    RawResponse::json(401, &json!({ "success": false, "message": "Unauthorized" }))
}

/// How the fake API answers `POST /auth/refresh`.
#[derive(Debug, Clone, Copy)]
pub enum RefreshReply {
    Grants { access: &'static str, refresh: Option<&'static str> },
    Rejects,
}

/// Fake admin API: resources answer `{ path }` to `valid_access` (or the
/// access token the refresh grants) and 401 to anything else.
pub fn fake_api(
    valid_access: &'static str,
    refresh: RefreshReply,
) -> impl Fn(&RequestContext) -> Result<RawResponse, ApiError> + Send + Sync + 'static {
    move |req| {
        if req.path == REFRESH_PATH {
            return Ok(match refresh {
                RefreshReply::Grants { access, refresh } => {
                    let mut data = json!({ "accessToken": access });
                    if let Some(r) = refresh {
                        data["refreshToken"] = json!(r);
                    }
                    ok(data)
                }
                RefreshReply::Rejects => RawResponse::json(
                    401,
                    &json!({ "success": false, "message": "Invalid refresh token" }),
                ),
            });
        }
        let granted = match refresh {
            RefreshReply::Grants { access, .. } => Some(access),
            RefreshReply::Rejects => None,
        };
        let bearer = req.bearer.as_deref();
        if bearer == Some(valid_access) || (bearer.is_some() && bearer == granted) {
            Ok(ok(json!({ "path": req.path })))
        } else {
            Ok(unauthorized())
        }
    }
}

/// Refresh token sent in a refresh request body, if any.
pub fn sent_refresh_token(req: &RequestContext) -> Option<String> {
    match req.body {
        RequestBody::Json(ref v) => v.get("refreshToken").and_then(|t| t.as_str()).map(str::to_owned),
        _ => None,
    }
}

/// Client over `transport` with a memory store seeded with the given tokens.
pub fn client_with(
    transport: MockTransport,
    access: Option<&str>,
    refresh: Option<&str>,
) -> (ApiClient, Arc<MockTransport>, Arc<MemoryTokenStore>) {
    let transport = Arc::new(transport);
    let tokens = Arc::new(MemoryTokenStore::with_tokens(access, refresh));
    let client = ApiClient::with_transport(
        Arc::clone(&transport) as Arc<dyn Transport>,
        Arc::clone(&tokens) as Arc<dyn TokenStore>,
    );
    (client, transport, tokens)
}
