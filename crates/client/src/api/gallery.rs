// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{GalleryCategory, GalleryImage, OrderEntry};
use crate::wire::{ListParams, Page};

/// Gallery image create/update payload. `url` usually comes from
/// [`UploadsApi::gallery_image`](super::UploadsApi::gallery_image).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<GalleryCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

pub struct GalleryApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl GalleryApi<'_> {
    /// Filters: `category`, `featured`.
    pub async fn list(&self, params: &ListParams) -> Result<Page<GalleryImage>, ApiError> {
        self.client.list("/gallery", params).await
    }

    pub async fn get(&self, id: u64) -> Result<GalleryImage, ApiError> {
        self.client.get(&format!("/gallery/{id}")).await
    }

    pub async fn categories(&self) -> Result<Value, ApiError> {
        self.client.get("/gallery/categories").await
    }

    pub async fn create(&self, input: &GalleryInput) -> Result<GalleryImage, ApiError> {
        self.client.post("/gallery", input).await
    }

    pub async fn update(&self, id: u64, input: &GalleryInput) -> Result<GalleryImage, ApiError> {
        self.client.put(&format!("/gallery/{id}"), input).await
    }

    pub async fn set_featured(&self, id: u64, featured: bool) -> Result<GalleryImage, ApiError> {
        self.client.patch(&format!("/gallery/{id}/featured"), &json!({ "featured": featured })).await
    }

    pub async fn delete(&self, id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/gallery/{id}")).await
    }

    pub async fn reorder(&self, orders: &[OrderEntry]) -> Result<Value, ApiError> {
        self.client.patch("/gallery/reorder", &json!({ "imageOrders": orders })).await
    }
}
