// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{PrayerTimes, SiteSettings};

/// Site settings update. Social links are sent flat (`facebookUrl`, ...).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_anonymous_donors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_gallery: Option<bool>,
}

pub struct SettingsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl SettingsApi<'_> {
    pub async fn get(&self) -> Result<SiteSettings, ApiError> {
        self.client.get("/settings").await
    }

    pub async fn update(&self, update: &SettingsUpdate) -> Result<SiteSettings, ApiError> {
        self.client.put("/settings", update).await
    }

    pub async fn set_maintenance(&self, enabled: bool) -> Result<SiteSettings, ApiError> {
        self.client.patch("/settings/maintenance", &json!({ "enabled": enabled })).await
    }

    pub async fn update_prayer_times(&self, times: &PrayerTimes) -> Result<SiteSettings, ApiError> {
        self.client.patch("/settings/prayer-times", times).await
    }
}
