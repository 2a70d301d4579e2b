// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AdminUser, Role};
use crate::wire::{ListParams, Page};

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Partial update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

pub struct UsersApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl UsersApi<'_> {
    pub async fn list(&self, params: &ListParams) -> Result<Page<AdminUser>, ApiError> {
        self.client.list("/users", params).await
    }

    pub async fn get(&self, id: u64) -> Result<AdminUser, ApiError> {
        self.client.get(&format!("/users/{id}")).await
    }

    pub async fn create(&self, user: &NewUser) -> Result<AdminUser, ApiError> {
        self.client.post("/users", user).await
    }

    pub async fn update(&self, id: u64, update: &UserUpdate) -> Result<AdminUser, ApiError> {
        self.client.put(&format!("/users/{id}"), update).await
    }

    pub async fn delete(&self, id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/users/{id}")).await
    }

    pub async fn set_active(&self, id: u64, is_active: bool) -> Result<AdminUser, ApiError> {
        self.client.patch(&format!("/users/{id}/status"), &json!({ "isActive": is_active })).await
    }
}
