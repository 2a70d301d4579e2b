// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Amanat admin: authenticated API client for the Amanat project console.
//!
//! Requests flow through [`client::ApiClient`], which attaches the stored
//! bearer token, recovers from expired access tokens with a single-flight
//! refresh, and replays requests that were blocked behind it. UI code talks
//! to [`session::Session`] and the resource groupings in [`api`].

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod session;
pub mod token;
pub mod transport;
pub mod wire;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use events::SessionEvent;
pub use session::Session;
pub use token::{FileTokenStore, MemoryTokenStore, TokenKind, TokenStore};
