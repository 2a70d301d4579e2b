// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token persistence: a small JSON key-value file with atomic writes.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::RwLock;

use super::{TokenKind, TokenStore};

/// On-disk layout: `{ "amanat_access_token": "...", "amanat_refresh_token": "..." }`.
type Entries = BTreeMap<String, String>;

/// Token store persisted to a JSON file, surviving process restarts.
///
/// Reads are served from memory; every mutation rewrites the file.
pub struct FileTokenStore {
    path: PathBuf,
    entries: RwLock<Entries>,
}

impl FileTokenStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load(&path) {
            Ok(entries) => entries,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), err = %e, "ignoring unreadable token file");
                }
                Entries::new()
            }
        };
        Self { path, entries: RwLock::new(entries) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &Entries) {
        if let Err(e) = save(&self.path, entries) {
            tracing::warn!(path = %self.path.display(), err = %e, "failed to persist tokens");
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, kind: TokenKind) -> Option<String> {
        self.entries.read().get(kind.key()).cloned()
    }

    fn set(&self, kind: TokenKind, token: String) {
        let mut entries = self.entries.write();
        entries.insert(kind.key().to_owned(), token);
        self.persist(&entries);
    }

    fn clear(&self) {
        let mut entries = self.entries.write();
        entries.remove(TokenKind::Access.key());
        entries.remove(TokenKind::Refresh.key());
        self.persist(&entries);
    }
}

fn load(path: &Path) -> anyhow::Result<Entries> {
    let contents = std::fs::read_to_string(path)?;
    let entries: Entries = serde_json::from_str(&contents)?;
    Ok(entries)
}

/// Write the entries atomically (write tmp + rename).
///
/// The temp name carries PID + counter so concurrent saves never share a
/// `.tmp` file. On unix the file is created owner-only (0600) before any
/// token is written to it.
fn save(path: &Path, entries: &Entries) -> anyhow::Result<()> {
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(entries)?;
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(
        "{}.{}.{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id(),
        seq,
    );
    let tmp_path = path.with_file_name(tmp_name);
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
