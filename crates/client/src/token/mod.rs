// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token storage: the key-value home of the access and refresh tokens.
//!
//! Stores never fail from the caller's point of view. A store that cannot
//! be read reports "no value"; a store that cannot be written logs and
//! keeps the in-memory copy.

pub mod file;

use std::collections::HashMap;

use parking_lot::RwLock;

pub use file::FileTokenStore;

/// Which of the two session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Fixed storage key for this token.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Access => "amanat_access_token",
            Self::Refresh => "amanat_refresh_token",
        }
    }
}

/// Key-value store for the session tokens.
pub trait TokenStore: Send + Sync {
    fn get(&self, kind: TokenKind) -> Option<String>;

    fn set(&self, kind: TokenKind, token: String);

    /// Remove both the access and the refresh token.
    fn clear(&self);

    fn access_token(&self) -> Option<String> {
        self.get(TokenKind::Access)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(TokenKind::Refresh)
    }

    /// True when neither token is stored.
    fn is_empty(&self) -> bool {
        self.access_token().is_none() && self.refresh_token().is_none()
    }
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<TokenKind, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the given tokens.
    pub fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
        let store = Self::new();
        if let Some(token) = access {
            store.set(TokenKind::Access, token.to_owned());
        }
        if let Some(token) = refresh {
            store.set(TokenKind::Refresh, token.to_owned());
        }
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, kind: TokenKind) -> Option<String> {
        self.tokens.read().get(&kind).cloned()
    }

    fn set(&self, kind: TokenKind, token: String) {
        self.tokens.write().insert(kind, token);
    }

    fn clear(&self) {
        self.tokens.write().clear();
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
