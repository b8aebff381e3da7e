//! Backing stores for the daily usage ledger.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{LecternError, Result};
use crate::types::UsageRecord;

/// Storage abstraction for per-date usage rows.
///
/// `increment` is the upsert: it must add to the row for `date` (creating a
/// zeroed row first if none exists) without losing concurrent updates.
#[async_trait]
pub trait UsageStore: Send + Sync {
    async fn load(&self, date: NaiveDate) -> Result<Option<UsageRecord>>;

    async fn increment(
        &self,
        date: NaiveDate,
        input_tokens: u64,
        output_tokens: u64,
        at: DateTime<Utc>,
    ) -> Result<UsageRecord>;
}

/// Process-local store. Rows live as long as the store.
#[derive(Debug, Default)]
pub struct MemoryUsageStore {
    rows: RwLock<BTreeMap<NaiveDate, UsageRecord>>,
}

impl MemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> LecternError {
    LecternError::Storage("usage store lock poisoned".into())
}

#[async_trait]
impl UsageStore for MemoryUsageStore {
    async fn load(&self, date: NaiveDate) -> Result<Option<UsageRecord>> {
        Ok(self.rows.read().map_err(|_| poisoned())?.get(&date).cloned())
    }

    async fn increment(
        &self,
        date: NaiveDate,
        input_tokens: u64,
        output_tokens: u64,
        at: DateTime<Utc>,
    ) -> Result<UsageRecord> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let row = rows.entry(date).or_insert_with(|| UsageRecord::empty(date));
        row.apply(input_tokens, output_tokens, at);
        Ok(row.clone())
    }
}

/// File-backed store keeping every day's row in one TOML document.
///
/// Writes go to a sibling temp file which is then renamed over the ledger,
/// so a crash mid-write leaves the previous contents intact.
///
/// Increments are serialized within one process only. Two processes sharing
/// the same file can lose an update; use a store with its own atomic
/// increment when several processes write to one ledger.
#[derive(Debug)]
pub struct FileUsageStore {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl FileUsageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    /// `~/.lectern/usage.toml`, or `./.lectern/usage.toml` without a home dir.
    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".lectern"))
            .unwrap_or_else(|| PathBuf::from(".lectern"))
            .join("usage.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<LedgerFile> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LedgerFile::default())
            }
            Err(err) => return Err(err.into()),
        };
        toml::from_str(&raw).map_err(|e| {
            LecternError::Storage(format!("corrupt ledger {}: {e}", self.path.display()))
        })
    }

    async fn write_file(&self, file: &LedgerFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let serialized =
            toml::to_string(file).map_err(|e| LecternError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("toml.tmp");
        tokio::fs::write(&tmp, serialized).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl UsageStore for FileUsageStore {
    async fn load(&self, date: NaiveDate) -> Result<Option<UsageRecord>> {
        let _guard = self.io_lock.lock().await;
        let file = self.read_file().await?;
        Ok(file.days.into_iter().find(|row| row.date == date))
    }

    async fn increment(
        &self,
        date: NaiveDate,
        input_tokens: u64,
        output_tokens: u64,
        at: DateTime<Utc>,
    ) -> Result<UsageRecord> {
        let _guard = self.io_lock.lock().await;
        let mut file = self.read_file().await?;
        let idx = match file.days.iter().position(|row| row.date == date) {
            Some(idx) => idx,
            None => {
                file.days.push(UsageRecord::empty(date));
                file.days.len() - 1
            }
        };
        file.days[idx].apply(input_tokens, output_tokens, at);
        let updated = file.days[idx].clone();
        self.write_file(&file).await?;
        Ok(updated)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    version: u32,
    #[serde(default)]
    days: Vec<UsageRecord>,
}

impl Default for LedgerFile {
    fn default() -> Self {
        Self {
            version: 1,
            days: Vec::new(),
        }
    }
}
