// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session lifecycle events broadcast to UI collaborators.

use serde::{Deserialize, Serialize};

/// Capacity of the session event channel.
pub const EVENT_CAPACITY: usize = 16;

/// Events emitted when the authenticated session changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A login succeeded.
    LoggedIn { user_id: u64 },
    /// The user logged out explicitly.
    LoggedOut,
    /// Token refresh failed; tokens were cleared and the caller must
    /// redirect to login.
    Expired { reason: String },
}
