// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::FilePart;

/// Upload directory on the server, used when deleting a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Gallery,
    Avatar,
    Member,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::Avatar => "avatar",
            Self::Member => "member",
        }
    }
}

/// A stored upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

pub struct UploadsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl UploadsApi<'_> {
    pub async fn gallery_image(&self, file: FilePart) -> Result<UploadedFile, ApiError> {
        self.client.upload("/upload/gallery", vec![as_field(file, "image")]).await
    }

    pub async fn gallery_images(&self, files: Vec<FilePart>) -> Result<Vec<UploadedFile>, ApiError> {
        let parts = files.into_iter().map(|f| as_field(f, "images")).collect();
        self.client.upload("/upload/gallery/multiple", parts).await
    }

    pub async fn avatar(&self, file: FilePart) -> Result<UploadedFile, ApiError> {
        self.client.upload("/upload/avatar", vec![as_field(file, "avatar")]).await
    }

    pub async fn member_photo(&self, file: FilePart) -> Result<UploadedFile, ApiError> {
        self.client.upload("/upload/member", vec![as_field(file, "photo")]).await
    }

    pub async fn delete(&self, kind: UploadKind, filename: &str) -> Result<Value, ApiError> {
        self.client.delete(&format!("/upload/{}/{filename}", kind.as_str())).await
    }
}

fn as_field(mut file: FilePart, field: &str) -> FilePart {
    field.clone_into(&mut file.field);
    file
}
