// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Message used for network failures that never produced a response.
pub const NETWORK_ERROR: &str = "Network Error";

/// Errors surfaced to callers of the API client.
///
/// 401 responses never appear here unless token refresh itself failed (then
/// as [`ApiError::SessionExpired`]) or the request was already retried once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout).
    Transport { message: String },
    /// The server answered with a non-success status.
    Http { status: u16, message: String },
    /// The session ended: refresh failed or no refresh token was stored.
    SessionExpired { message: String },
    /// The response body did not match the expected shape.
    Decode { message: String },
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http { status, message: message.into() }
    }

    pub fn session_expired(message: impl Into<String>) -> Self {
        Self::SessionExpired { message: message.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    /// Build the error for a non-success response, preferring the server's
    /// `message` field over the generic status text.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        Self::Http { status, message }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the caller must treat the session as over and re-authenticate.
    pub fn is_session_terminal(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }

    /// Human-readable message, suitable for a toast.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Http { message, .. }
            | Self::SessionExpired { message }
            | Self::Decode { message } => message,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "TRANSPORT",
            Self::Http { .. } => "HTTP",
            Self::SessionExpired { .. } => "SESSION_EXPIRED",
            Self::Decode { .. } => "DECODE",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { status, message } => write!(f, "{} ({status}): {message}", self.as_str()),
            other => write!(f, "{}: {}", other.as_str(), other.message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::decode(e.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
