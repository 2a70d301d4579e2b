// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed bindings for the admin API's resource endpoints.
//!
//! Each grouping borrows an [`ApiClient`] and maps one method to one
//! path/verb pair; token handling and refresh happen in the client.

mod activity;
mod auth;
mod committees;
mod contributions;
mod gallery;
mod land_donors;
mod settings;
mod statistics;
mod uploads;
mod users;

pub use activity::ActivityApi;
pub use auth::AuthApi;
pub use committees::{CommitteeInput, CommitteesApi, MemberInput};
pub use contributions::{ContributionInput, ContributionsApi};
pub use gallery::{GalleryApi, GalleryInput};
pub use land_donors::{LandDonorInput, LandDonorsApi};
pub use settings::{SettingsApi, SettingsUpdate};
pub use statistics::StatisticsApi;
pub use uploads::{UploadKind, UploadedFile, UploadsApi};
pub use users::{NewUser, UserUpdate, UsersApi};

use crate::client::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    pub fn committees(&self) -> CommitteesApi<'_> {
        CommitteesApi { client: self }
    }

    pub fn contributions(&self) -> ContributionsApi<'_> {
        ContributionsApi { client: self }
    }

    pub fn land_donors(&self) -> LandDonorsApi<'_> {
        LandDonorsApi { client: self }
    }

    pub fn gallery(&self) -> GalleryApi<'_> {
        GalleryApi { client: self }
    }

    pub fn settings(&self) -> SettingsApi<'_> {
        SettingsApi { client: self }
    }

    pub fn activity(&self) -> ActivityApi<'_> {
        ActivityApi { client: self }
    }

    pub fn statistics(&self) -> StatisticsApi<'_> {
        StatisticsApi { client: self }
    }

    pub fn uploads(&self) -> UploadsApi<'_> {
        UploadsApi { client: self }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
