// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

/// Default API base URL (the admin backend's local dev address).
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// File name of the persisted token store inside the state directory.
pub const TOKEN_FILE: &str = "tokens.json";

/// Connection settings for the admin API.
#[derive(Debug, Clone, clap::Args)]
pub struct ClientConfig {
    /// Base URL of the admin API, including the `/api` prefix.
    #[arg(long, default_value = DEFAULT_API_URL, env = "AMANAT_API_URL")]
    pub api_url: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = 15000, env = "AMANAT_TIMEOUT_MS")]
    pub timeout_ms: u64,

    /// Directory holding persisted session tokens.
    #[arg(long, env = "AMANAT_STATE_DIR")]
    pub state_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_owned(), timeout_ms: 15000, state_dir: None }
    }
}

impl ClientConfig {
    /// Config pointing at `api_url` with default timeout and state dir.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self { api_url: api_url.into(), ..Self::default() }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Base URL without a trailing slash, ready for `{base}{path}` joins.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Resolve the state directory: explicit flag, else [`default_state_dir`].
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(default_state_dir)
    }

    /// Path of the persisted token file.
    pub fn token_path(&self) -> PathBuf {
        self.state_dir().join(TOKEN_FILE)
    }
}

/// Resolve the default state directory.
///
/// Checks `$XDG_STATE_HOME/amanat`, then `$HOME/.local/state/amanat`.
/// (`AMANAT_STATE_DIR` is handled by clap's env fallback.)
pub fn default_state_dir() -> PathBuf {
    default_state_dir_with(|name| std::env::var(name).ok())
}

fn default_state_dir_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(xdg) = env("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("amanat");
    }
    if let Some(home) = env("HOME") {
        return PathBuf::from(home).join(".local/state/amanat");
    }
    PathBuf::from(".amanat")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
