// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session facade for UI collaborators: login, logout, startup restore and
//! the cached current user.

use parking_lot::{Mutex, RwLock};
use serde_json::json;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::events::SessionEvent;
use crate::models::{AdminUser, LoginData};
use crate::token::TokenKind;
use crate::transport::{Method, RequestContext};

pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const PROFILE_PATH: &str = "/auth/me";

pub struct Session {
    client: ApiClient,
    user: RwLock<Option<AdminUser>>,
    /// Own subscription, used to notice expiry triggered by any request.
    events: Mutex<broadcast::Receiver<SessionEvent>>,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        let events = Mutex::new(client.subscribe());
        Self { client, user: RwLock::new(None), events }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Receive session lifecycle events. `Expired` means "go to login".
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.client.subscribe()
    }

    /// Authenticate with email and password.
    ///
    /// Returns `false` on any failure (bad credentials, network, malformed
    /// response); the store is left untouched in that case.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        match self.try_login(email, password).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, role = ?user.role, "logged in");
                self.client.emit(SessionEvent::LoggedIn { user_id: user.id });
                *self.user.write() = Some(user);
                true
            }
            Err(e) => {
                tracing::warn!(err = %e, "login failed");
                false
            }
        }
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<AdminUser, ApiError> {
        let req = RequestContext::new(Method::Post, LOGIN_PATH)
            .json(json!({ "email": email, "password": password }))
            .skip_refresh();
        let envelope = self.client.send_enveloped(req).await?;
        let data: LoginData = serde_json::from_value(envelope.data)?;

        let tokens = self.client.tokens();
        tokens.set(TokenKind::Access, data.access_token);
        if let Some(refresh) = data.refresh_token {
            tokens.set(TokenKind::Refresh, refresh);
        }
        self.drain_events();
        Ok(data.user)
    }

    /// End the session. The server is told best-effort; local state is
    /// always cleared.
    pub async fn logout(&self) {
        if self.client.tokens().access_token().is_some() {
            let req = RequestContext::new(Method::Post, LOGOUT_PATH).skip_refresh();
            if let Err(e) = self.client.execute(req).await {
                tracing::debug!(err = %e, "server logout failed, clearing locally");
            }
        }
        self.client.tokens().clear();
        *self.user.write() = None;
        self.drain_events();
        self.client.emit(SessionEvent::LoggedOut);
        tracing::info!("logged out");
    }

    /// Rebuild the session from stored tokens at startup.
    ///
    /// Returns the profile when the stored tokens are still good. Any
    /// failure clears the store without surfacing an error.
    pub async fn restore_session(&self) -> Option<AdminUser> {
        let tokens = self.client.tokens();
        if tokens.is_empty() {
            return None;
        }
        match self.client.get::<AdminUser>(PROFILE_PATH).await {
            Ok(user) => {
                tracing::debug!(user_id = user.id, "session restored");
                self.drain_events();
                *self.user.write() = Some(user.clone());
                Some(user)
            }
            Err(e) => {
                tracing::debug!(err = %e, "stored session rejected");
                tokens.clear();
                *self.user.write() = None;
                None
            }
        }
    }

    /// Cached user, if logged in. Never touches the network.
    pub fn current_user(&self) -> Option<AdminUser> {
        if self.drain_events() {
            *self.user.write() = None;
        }
        self.user.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some() && self.client.tokens().access_token().is_some()
    }

    /// Consume pending events. Returns whether an expiry was among them.
    fn drain_events(&self) -> bool {
        let mut rx = self.events.lock();
        let mut expired = false;
        loop {
            match rx.try_recv() {
                Ok(SessionEvent::Expired { .. }) => expired = true,
                Ok(_) => {}
                Err(TryRecvError::Lagged(_)) => {
                    // Missed events; trust the store instead.
                    expired |= self.client.tokens().is_empty();
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return expired,
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
