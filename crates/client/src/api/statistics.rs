// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::DashboardStats;
use crate::transport::Method;

pub struct StatisticsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl StatisticsApi<'_> {
    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        self.client.get("/statistics/dashboard").await
    }

    /// Ask the server to recompute cached dashboard figures.
    pub async fn refresh(&self) -> Result<Value, ApiError> {
        self.client.send(Method::Post, "/statistics/refresh", None, RequestOptions::default()).await
    }
}
