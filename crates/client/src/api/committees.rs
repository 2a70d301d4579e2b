// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Committee, CommitteeMember, CommitteeType, Designation, OrderEntry};
use crate::wire::{ListParams, Page};

/// Committee create/update payload. Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CommitteeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Committee member create/update payload.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<Designation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation_label: Option<String>,
    /// Required on create, ignored on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committee_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

pub struct CommitteesApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl CommitteesApi<'_> {
    pub async fn list(&self, params: &ListParams) -> Result<Page<Committee>, ApiError> {
        self.client.list("/committees", params).await
    }

    pub async fn current(&self) -> Result<Committee, ApiError> {
        self.client.get("/committees/current").await
    }

    pub async fn get(&self, id: u64) -> Result<Committee, ApiError> {
        self.client.get(&format!("/committees/{id}")).await
    }

    pub async fn create(&self, input: &CommitteeInput) -> Result<Committee, ApiError> {
        self.client.post("/committees", input).await
    }

    pub async fn update(&self, id: u64, input: &CommitteeInput) -> Result<Committee, ApiError> {
        self.client.put(&format!("/committees/{id}"), input).await
    }

    pub async fn delete(&self, id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/committees/{id}")).await
    }

    pub async fn member(&self, id: u64) -> Result<CommitteeMember, ApiError> {
        self.client.get(&format!("/committees/members/{id}")).await
    }

    pub async fn create_member(&self, input: &MemberInput) -> Result<CommitteeMember, ApiError> {
        self.client.post("/committees/members", input).await
    }

    pub async fn update_member(&self, id: u64, input: &MemberInput) -> Result<CommitteeMember, ApiError> {
        self.client.put(&format!("/committees/members/{id}"), input).await
    }

    pub async fn delete_member(&self, id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/committees/members/{id}")).await
    }

    pub async fn reorder_members(
        &self,
        committee_id: u64,
        orders: &[OrderEntry],
    ) -> Result<Value, ApiError> {
        self.client
            .patch(
                &format!("/committees/{committee_id}/members/reorder"),
                &json!({ "memberOrders": orders }),
            )
            .await
    }
}
