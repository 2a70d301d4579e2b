// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight access-token refresh.
//!
//! The first request to hit a recoverable 401 becomes the leader and performs
//! `POST /auth/refresh`. Requests that hit 401 while the leader is in flight
//! queue behind it and are released in FIFO order with the leader's outcome.
//! Admission (check the gate, set it or enqueue) happens under one lock that
//! is never held across an `.await`.
//!
//! Released requests are woken together, so the runtime alone would decide
//! which replay reaches the transport first. Each admission therefore also
//! links a [`ReplayTurn`] into a chain: a replay waits for its predecessor to
//! be dispatched before dispatching its own.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::{broadcast, oneshot};

use crate::error::ApiError;
use crate::events::SessionEvent;
use crate::models::TokenPair;
use crate::token::{TokenKind, TokenStore};
use crate::transport::{Method, RequestContext, Transport};
use crate::wire::Envelope;

/// Refresh endpoint, relative to the API base URL.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Message given to waiters when the leader was dropped mid-refresh.
const REFRESH_INTERRUPTED: &str = "token refresh interrupted";

type Outcome = Result<String, ApiError>;

#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    /// Requests blocked behind the in-flight refresh, oldest first.
    queue: VecDeque<oneshot::Sender<Outcome>>,
    /// Dispatch signal of the most recently admitted request.
    tail: Option<oneshot::Receiver<()>>,
}

enum Ticket<'a> {
    Leader(LeaderGuard<'a>, ReplayTurn),
    Follower(oneshot::Receiver<Outcome>, ReplayTurn),
}

/// A request's place in the replay order after a shared refresh.
///
/// Dropping a turn without passing it still releases the next one.
#[derive(Debug, Default)]
pub struct ReplayTurn {
    prev: Option<oneshot::Receiver<()>>,
    next: Option<oneshot::Sender<()>>,
}

impl ReplayTurn {
    /// Wait until the previous replay has been dispatched. Cancel safe.
    pub async fn wait(&mut self) {
        if let Some(prev) = self.prev.as_mut() {
            let _ = prev.await;
        }
        self.prev = None;
    }

    /// Let the next replay dispatch.
    pub fn pass(&mut self) {
        if let Some(next) = self.next.take() {
            let _ = next.send(());
        }
    }
}

/// A refreshed access token plus the holder's turn to replay with it.
#[derive(Debug)]
pub struct Replay {
    pub token: String,
    pub turn: ReplayTurn,
}

impl Replay {
    /// Replay outside any refresh chain.
    pub fn immediate(token: String) -> Self {
        Self { token, turn: ReplayTurn::default() }
    }
}

/// Owns the refresh gate and the queue of blocked requests.
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
    events: broadcast::Sender<SessionEvent>,
}

impl RefreshCoordinator {
    pub fn new(events: broadcast::Sender<SessionEvent>) -> Self {
        Self { state: Mutex::new(RefreshState::default()), events }
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.lock().refreshing
    }

    /// Number of requests waiting on the in-flight refresh.
    pub fn queued(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Obtain a fresh access token after `trigger` (a 401) was received.
    ///
    /// Returns the new token with the caller's replay turn, or
    /// [`ApiError::SessionExpired`] once the session has been cleared.
    pub async fn recover(
        &self,
        transport: &dyn Transport,
        tokens: &dyn TokenStore,
        trigger: ApiError,
    ) -> Result<Replay, ApiError> {
        match self.admit() {
            Ticket::Follower(rx, turn) => {
                tracing::debug!("waiting on in-flight token refresh");
                let token = rx.await.unwrap_or_else(|_| Err(ApiError::transport(REFRESH_INTERRUPTED)))?;
                Ok(Replay { token, turn })
            }
            Ticket::Leader(guard, turn) => {
                let outcome = refresh_tokens(transport, tokens, &trigger).await;
                match outcome {
                    Ok(_) => tracing::info!("access token refreshed"),
                    Err(ref e) => {
                        tracing::warn!(err = %e, "token refresh failed, ending session");
                        tokens.clear();
                    }
                }
                guard.settle(&outcome);
                if let Err(ref e) = outcome {
                    let _ = self.events.send(SessionEvent::Expired { reason: e.message().to_owned() });
                }
                outcome.map(|token| Replay { token, turn })
            }
        }
    }

    fn admit(&self) -> Ticket<'_> {
        let mut state = self.state.lock();
        let (next, dispatched) = oneshot::channel();
        let turn = ReplayTurn { prev: state.tail.replace(dispatched), next: Some(next) };
        if state.refreshing {
            let (tx, rx) = oneshot::channel();
            state.queue.push_back(tx);
            Ticket::Follower(rx, turn)
        } else {
            state.refreshing = true;
            Ticket::Leader(LeaderGuard { coordinator: self, settled: false }, turn)
        }
    }

    /// Reopen the gate and release every waiter, oldest first.
    fn finish(&self, outcome: &Outcome) {
        let waiters = {
            let mut state = self.state.lock();
            state.refreshing = false;
            state.tail = None;
            std::mem::take(&mut state.queue)
        };
        if !waiters.is_empty() {
            tracing::debug!(count = waiters.len(), ok = outcome.is_ok(), "releasing queued requests");
        }
        for tx in waiters {
            let _ = tx.send(outcome.clone());
        }
    }
}

/// Held by the leader; releases the queue even if the leader is dropped.
struct LeaderGuard<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl LeaderGuard<'_> {
    fn settle(mut self, outcome: &Outcome) {
        self.settled = true;
        self.coordinator.finish(outcome);
    }
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("token refresh dropped before completion");
            self.coordinator.finish(&Err(ApiError::transport(REFRESH_INTERRUPTED)));
        }
    }
}

/// Exchange the stored refresh token for a new access token.
///
/// Every failure, including a missing refresh token (no request is made),
/// is reported as [`ApiError::SessionExpired`].
async fn refresh_tokens(
    transport: &dyn Transport,
    tokens: &dyn TokenStore,
    trigger: &ApiError,
) -> Result<String, ApiError> {
    let Some(refresh_token) = tokens.refresh_token() else {
        tracing::debug!("no refresh token stored");
        return Err(ApiError::session_expired(trigger.message()));
    };

    let req = RequestContext::new(Method::Post, REFRESH_PATH)
        .json(json!({ "refreshToken": refresh_token }))
        .skip_refresh();
    let resp = transport.execute(&req).await.map_err(|e| ApiError::session_expired(e.message()))?;
    if !resp.is_success() {
        let err = ApiError::from_response(resp.status, &resp.body);
        return Err(ApiError::session_expired(err.message()));
    }

    let envelope: Envelope<serde_json::Value> = serde_json::from_slice(&resp.body)
        .map_err(|e| ApiError::session_expired(format!("malformed refresh response: {e}")))?;
    let pair: TokenPair = serde_json::from_value(envelope.data)
        .map_err(|e| ApiError::session_expired(format!("malformed refresh response: {e}")))?;

    tokens.set(TokenKind::Access, pair.access_token.clone());
    if let Some(rotated) = pair.refresh_token {
        tokens.set(TokenKind::Refresh, rotated);
    }
    Ok(pair.access_token)
}

#[cfg(test)]
#[path = "refresh_tests.rs"]
mod tests;
