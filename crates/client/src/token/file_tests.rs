// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_file_reads_as_no_value() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileTokenStore::open(dir.path().join("tokens.json"));
    assert_eq!(store.access_token(), None);
    assert_eq!(store.refresh_token(), None);
    Ok(())
}

#[test]
fn tokens_survive_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested/state/tokens.json");

    let store = FileTokenStore::open(&path);
    store.set(TokenKind::Access, "acc".to_owned());
    store.set(TokenKind::Refresh, "ref".to_owned());

    let reopened = FileTokenStore::open(&path);
    assert_eq!(reopened.access_token().as_deref(), Some("acc"));
    assert_eq!(reopened.refresh_token().as_deref(), Some("ref"));
    Ok(())
}

#[test]
fn file_uses_fixed_key_names() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tokens.json");
    let store = FileTokenStore::open(&path);
    store.set(TokenKind::Access, "acc".to_owned());

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(raw["amanat_access_token"], "acc");
    assert!(raw.get("amanat_refresh_token").is_none());
    Ok(())
}

#[test]
fn clear_empties_the_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tokens.json");
    let store = FileTokenStore::open(&path);
    store.set(TokenKind::Access, "acc".to_owned());
    store.set(TokenKind::Refresh, "ref".to_owned());
    store.clear();

    assert!(store.is_empty());
    assert!(FileTokenStore::open(&path).is_empty());
    Ok(())
}

#[test]
fn corrupt_file_starts_empty() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, "{ not json")?;

    let store = FileTokenStore::open(&path);
    assert!(store.is_empty());

    store.set(TokenKind::Access, "fresh".to_owned());
    assert_eq!(FileTokenStore::open(&path).access_token().as_deref(), Some("fresh"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn token_file_is_owner_only() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tokens.json");
    let store = FileTokenStore::open(&path);
    store.set(TokenKind::Access, "acc".to_owned());
    store.set(TokenKind::Refresh, "ref".to_owned());

    let mode = std::fs::metadata(&path)?.permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    Ok(())
}
