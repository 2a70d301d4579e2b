// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use serde_json::{json, Value};

use super::*;
use crate::models::{ContributionStatus, OrderEntry, Role};
use crate::test_support::{client_with, ok, MockTransport};
use crate::transport::{FilePart, Method, RequestBody, RequestContext};
use crate::wire::ListParams;

/// Client whose server answers every request with `data`.
fn answering(data: Value) -> (ApiClient, Arc<MockTransport>) {
    let (client, transport, _tokens) =
        client_with(MockTransport::new(move |_req| Ok(ok(data.clone()))), Some("acc-1"), None);
    (client, transport)
}

fn last(transport: &MockTransport) -> anyhow::Result<RequestContext> {
    transport.calls().pop().ok_or_else(|| anyhow::anyhow!("no request sent"))
}

fn json_body(req: &RequestContext) -> Option<&Value> {
    match req.body {
        RequestBody::Json(ref v) => Some(v),
        _ => None,
    }
}

fn user_json() -> Value {
    json!({ "id": 9, "email": "viewer@amanat.org", "name": "Viewer", "role": "viewer", "isActive": false })
}

#[tokio::test]
async fn users_set_active_patches_status() -> anyhow::Result<()> {
    let (client, transport) = answering(user_json());

    let user = client.users().set_active(9, false).await?;

    assert!(!user.is_active);
    let req = last(&transport)?;
    assert_eq!((req.method, req.path.as_str()), (Method::Patch, "/users/9/status"));
    assert_eq!(json_body(&req), Some(&json!({ "isActive": false })));
    Ok(())
}

#[tokio::test]
async fn user_update_omits_unset_fields() -> anyhow::Result<()> {
    let (client, transport) = answering(user_json());

    let update = UserUpdate { role: Some(Role::Editor), ..UserUpdate::default() };
    client.users().update(9, &update).await?;

    let req = last(&transport)?;
    assert_eq!(req.method, Method::Put);
    assert_eq!(json_body(&req), Some(&json!({ "role": "editor" })));
    Ok(())
}

#[tokio::test]
async fn contribution_status_carries_optional_notes() -> anyhow::Result<()> {
    let (client, transport) = answering(json!({
        "id": 3, "contributorName": "Anon", "type": "Cash", "amount": 5000.0,
        "date": "2026-02-01", "status": "verified"
    }));

    client.contributions().set_status(3, ContributionStatus::Verified, Some("receipt checked")).await?;
    let with_notes = last(&transport)?;
    client.contributions().set_status(3, ContributionStatus::Rejected, None).await?;
    let without = last(&transport)?;

    assert_eq!(with_notes.path, "/contributions/3/status");
    assert_eq!(
        json_body(&with_notes),
        Some(&json!({ "status": "verified", "notes": "receipt checked" }))
    );
    assert_eq!(json_body(&without), Some(&json!({ "status": "rejected" })));
    Ok(())
}

#[tokio::test]
async fn monthly_chart_sends_year_only_when_given() -> anyhow::Result<()> {
    let (client, transport) = answering(json!([]));

    client.contributions().monthly(Some(2025)).await?;
    assert_eq!(last(&transport)?.query, vec![("year".to_owned(), "2025".to_owned())]);

    client.contributions().monthly(None).await?;
    assert!(last(&transport)?.query.is_empty());
    Ok(())
}

#[tokio::test]
async fn activity_cleanup_is_a_delete_with_days() -> anyhow::Result<()> {
    let (client, transport) = answering(json!({ "deleted": 12 }));

    let data = client.activity().cleanup(Some(90)).await?;

    assert_eq!(data, json!({ "deleted": 12 }));
    let req = last(&transport)?;
    assert_eq!((req.method, req.path.as_str()), (Method::Delete, "/activity/cleanup"));
    assert_eq!(req.query, vec![("days".to_owned(), "90".to_owned())]);
    Ok(())
}

#[tokio::test]
async fn reorder_members_wraps_orders() -> anyhow::Result<()> {
    let (client, transport) = answering(Value::Null);

    let orders = [OrderEntry { id: 4, order: 1 }, OrderEntry { id: 2, order: 2 }];
    client.committees().reorder_members(7, &orders).await?;

    let req = last(&transport)?;
    assert_eq!(req.path, "/committees/7/members/reorder");
    assert_eq!(
        json_body(&req),
        Some(&json!({ "memberOrders": [{ "id": 4, "order": 1 }, { "id": 2, "order": 2 }] }))
    );
    Ok(())
}

#[tokio::test]
async fn settings_update_sends_flat_social_links() -> anyhow::Result<()> {
    let (client, transport) = answering(json!({ "siteName": "Amanat" }));

    let update = SettingsUpdate {
        facebook_url: Some("https://facebook.com/amanat".to_owned()),
        enable_gallery: Some(false),
        ..SettingsUpdate::default()
    };
    let settings = client.settings().update(&update).await?;

    assert_eq!(settings.site_name, "Amanat");
    assert_eq!(
        json_body(&last(&transport)?),
        Some(&json!({ "facebookUrl": "https://facebook.com/amanat", "enableGallery": false }))
    );
    Ok(())
}

#[tokio::test]
async fn single_uploads_use_endpoint_field() -> anyhow::Result<()> {
    let cases = [
        (UploadKind::Gallery, "/upload/gallery", "image"),
        (UploadKind::Avatar, "/upload/avatar", "avatar"),
        (UploadKind::Member, "/upload/member", "photo"),
    ];
    for (kind, path, field) in cases {
        let (client, transport) = answering(json!({ "url": "/uploads/x.jpg" }));
        let file = FilePart::new("file", "x.jpg", "image/jpeg", &b"jpeg"[..]);

        let uploads = client.uploads();
        let stored = match kind {
            UploadKind::Gallery => uploads.gallery_image(file).await?,
            UploadKind::Avatar => uploads.avatar(file).await?,
            UploadKind::Member => uploads.member_photo(file).await?,
        };

        assert_eq!(stored.url, "/uploads/x.jpg");
        let req = last(&transport)?;
        assert_eq!(req.path, path);
        let RequestBody::Multipart(parts) = req.body else {
            anyhow::bail!("{path}: expected multipart body");
        };
        assert_eq!(parts[0].field, field, "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn multiple_gallery_upload_repeats_images_field() -> anyhow::Result<()> {
    let (client, transport) = answering(json!([{ "url": "/a.jpg" }, { "url": "/b.jpg" }]));

    let files = vec![
        FilePart::new("", "a.jpg", "image/jpeg", &b"a"[..]),
        FilePart::new("", "b.jpg", "image/jpeg", &b"b"[..]),
    ];
    let stored = client.uploads().gallery_images(files).await?;

    assert_eq!(stored.len(), 2);
    let req = last(&transport)?;
    assert_eq!(req.path, "/upload/gallery/multiple");
    let RequestBody::Multipart(parts) = req.body else {
        anyhow::bail!("expected multipart body");
    };
    assert!(parts.iter().all(|p| p.field == "images"));
    Ok(())
}

#[tokio::test]
async fn delete_upload_builds_typed_path() -> anyhow::Result<()> {
    let (client, transport) = answering(Value::Null);

    client.uploads().delete(UploadKind::Avatar, "me.png").await?;

    let req = last(&transport)?;
    assert_eq!((req.method, req.path.as_str()), (Method::Delete, "/upload/avatar/me.png"));
    Ok(())
}

#[tokio::test]
async fn dashboard_statistics_decode() -> anyhow::Result<()> {
    let (client, _transport) = answering(json!({
        "totalFunds": 2_500_000.0,
        "landDonated": 42.5,
        "totalContributors": 310,
        "pendingContributions": 4,
        "monthlyGrowth": 12.5,
        "totalCommittees": 3,
        "galleryImages": 58
    }));

    let stats = client.statistics().dashboard().await?;

    assert_eq!(stats.total_contributors, 310);
    assert_eq!(stats.pending_contributions, 4);
    Ok(())
}

#[tokio::test]
async fn statistics_refresh_posts_without_body() -> anyhow::Result<()> {
    let (client, transport) = answering(Value::Null);

    client.statistics().refresh().await?;

    let req = last(&transport)?;
    assert_eq!((req.method, req.body), (Method::Post, RequestBody::Empty));
    Ok(())
}

#[tokio::test]
async fn list_endpoints_forward_filters() -> anyhow::Result<()> {
    let (client, transport) = answering(json!([]));

    let params = ListParams::default().search("Rahman").filter("verified", true);
    let page = client.land_donors().list(&params).await?;

    assert!(page.items.is_empty());
    let req = last(&transport)?;
    assert_eq!(req.path, "/land-donors");
    assert_eq!(
        req.query,
        vec![
            ("search".to_owned(), "Rahman".to_owned()),
            ("verified".to_owned(), "true".to_owned())
        ]
    );
    Ok(())
}
