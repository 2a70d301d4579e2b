// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::ActivityLog;
use crate::wire::{ListParams, Page};

pub struct ActivityApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl ActivityApi<'_> {
    /// Filter: `type`.
    pub async fn list(&self, params: &ListParams) -> Result<Page<ActivityLog>, ApiError> {
        self.client.list("/activity", params).await
    }

    pub async fn recent(&self, limit: Option<u32>) -> Result<Vec<ActivityLog>, ApiError> {
        let query = limit.map(|l| vec![("limit".to_owned(), l.to_string())]).unwrap_or_default();
        self.client.get_with("/activity/recent", query).await
    }

    /// Delete entries older than `days` (server default when `None`).
    pub async fn cleanup(&self, days: Option<u32>) -> Result<Value, ApiError> {
        let query = days.map(|d| vec![("days".to_owned(), d.to_string())]).unwrap_or_default();
        self.client.delete_with("/activity/cleanup", query).await
    }
}
