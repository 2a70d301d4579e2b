// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::AdminUser;
use crate::session::PROFILE_PATH;

/// Profile and password endpoints. Login and logout live on
/// [`Session`](crate::session::Session).
pub struct AuthApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl AuthApi<'_> {
    pub async fn profile(&self) -> Result<AdminUser, ApiError> {
        self.client.get(PROFILE_PATH).await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<Value, ApiError> {
        let body = json!({
            "currentPassword": current_password,
            "newPassword": new_password,
            "confirmPassword": confirm_password,
        });
        self.client.post("/auth/change-password", &body).await
    }
}
