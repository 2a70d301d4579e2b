// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{LandDonor, LandType};
use crate::wire::{ListParams, Page};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandDonorInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_type: Option<LandType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

pub struct LandDonorsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl LandDonorsApi<'_> {
    /// Filters: `verified`, `landType`.
    pub async fn list(&self, params: &ListParams) -> Result<Page<LandDonor>, ApiError> {
        self.client.list("/land-donors", params).await
    }

    pub async fn get(&self, id: u64) -> Result<LandDonor, ApiError> {
        self.client.get(&format!("/land-donors/{id}")).await
    }

    pub async fn create(&self, input: &LandDonorInput) -> Result<LandDonor, ApiError> {
        self.client.post("/land-donors", input).await
    }

    pub async fn update(&self, id: u64, input: &LandDonorInput) -> Result<LandDonor, ApiError> {
        self.client.put(&format!("/land-donors/{id}"), input).await
    }

    pub async fn set_verified(&self, id: u64, verified: bool) -> Result<LandDonor, ApiError> {
        self.client.patch(&format!("/land-donors/{id}/verify"), &json!({ "verified": verified })).await
    }

    pub async fn delete(&self, id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/land-donors/{id}")).await
    }

    pub async fn statistics(&self) -> Result<Value, ApiError> {
        self.client.get("/land-donors/statistics").await
    }
}
