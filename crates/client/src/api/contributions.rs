// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Contribution, ContributionStatus, ContributionType};
use crate::wire::{ListParams, Page};

/// Contribution create/update payload. Create needs name, type, amount and
/// date; update sends only what is set.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContributionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
}

pub struct ContributionsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl ContributionsApi<'_> {
    /// Filters: `type`, `status`, `anonymous`.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Contribution>, ApiError> {
        self.client.list("/contributions", params).await
    }

    pub async fn get(&self, id: u64) -> Result<Contribution, ApiError> {
        self.client.get(&format!("/contributions/{id}")).await
    }

    pub async fn create(&self, input: &ContributionInput) -> Result<Contribution, ApiError> {
        self.client.post("/contributions", input).await
    }

    pub async fn update(&self, id: u64, input: &ContributionInput) -> Result<Contribution, ApiError> {
        self.client.put(&format!("/contributions/{id}"), input).await
    }

    pub async fn set_status(
        &self,
        id: u64,
        status: ContributionStatus,
        notes: Option<&str>,
    ) -> Result<Contribution, ApiError> {
        let mut body = json!({ "status": status });
        if let Some(notes) = notes {
            body["notes"] = json!(notes);
        }
        self.client.patch(&format!("/contributions/{id}/status"), &body).await
    }

    pub async fn delete(&self, id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/contributions/{id}")).await
    }

    pub async fn statistics(&self) -> Result<Value, ApiError> {
        self.client.get("/contributions/statistics").await
    }

    /// Monthly totals for charting; the server defaults to the current year.
    pub async fn monthly(&self, year: Option<i32>) -> Result<Value, ApiError> {
        let query = year.map(|y| vec![("year".to_owned(), y.to_string())]).unwrap_or_default();
        self.client.get_with("/contributions/chart/monthly", query).await
    }
}
