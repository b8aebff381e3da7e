//! Daily token usage ledger gating every generation call.
//!
//! One row per UTC date. The budget check reads today's row; `record` adds a
//! successful call's tokens under a single-writer lock. The check and the
//! record are not atomic with the network call in between; usage can
//! overshoot the limit by at most one call's cost per in-flight call.

pub mod store;

pub use store::{FileUsageStore, MemoryUsageStore, UsageStore};

use std::sync::{Arc, Mutex as StdMutex};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::LecternConfig;
use crate::error::{LecternError, Result};
use crate::types::{UsageRecord, UsageReport};

/// Source of the current time, injectable so day rollover can be tested.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: StdMutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: StdMutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|p| p.into_inner()) = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.now.lock().unwrap_or_else(|p| p.into_inner()) += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|guard| *guard).unwrap_or_else(|p| *p.into_inner())
    }
}

/// Snapshot of today's budget for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub date: NaiveDate,
    pub used_tokens: u64,
    pub daily_limit: u64,
    pub remaining_tokens: u64,
    pub call_count: u64,
    pub enabled: bool,
}

/// Durable per-day token counter shared by all in-flight generations.
pub struct UsageLedger {
    store: Arc<dyn UsageStore>,
    clock: Arc<dyn Clock>,
    daily_limit: u64,
    enabled: bool,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for UsageLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageLedger")
            .field("daily_limit", &self.daily_limit)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl UsageLedger {
    pub fn new(store: Arc<dyn UsageStore>, daily_limit: u64, enabled: bool) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            daily_limit,
            enabled,
            write_lock: Mutex::new(()),
        }
    }

    /// In-memory ledger, mostly for tests and one-off tools.
    pub fn in_memory(daily_limit: u64) -> Self {
        Self::new(Arc::new(MemoryUsageStore::new()), daily_limit, true)
    }

    /// Build from config: file-backed when `ledger_path` is set.
    pub fn from_config(config: &LecternConfig) -> Self {
        let store: Arc<dyn UsageStore> = match &config.ledger_path {
            Some(path) => Arc::new(FileUsageStore::new(path.clone())),
            None => Arc::new(MemoryUsageStore::new()),
        };
        Self::new(store, config.daily_token_limit, config.rate_limiting_enabled)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn daily_limit(&self) -> u64 {
        self.daily_limit
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Today's row, or a zeroed row if nothing has been recorded yet.
    pub async fn today_usage(&self) -> Result<UsageRecord> {
        let today = self.clock.today();
        Ok(self
            .store
            .load(today)
            .await?
            .unwrap_or_else(|| UsageRecord::empty(today)))
    }

    /// Whether another call may start. Always true when limiting is disabled.
    pub async fn check_budget(&self) -> Result<bool> {
        if !self.enabled {
            return Ok(true);
        }
        let usage = self.today_usage().await?;
        Ok(usage.total_tokens() < self.daily_limit)
    }

    /// Like [`check_budget`](Self::check_budget) but fails with `BudgetExceeded`.
    pub async fn ensure_budget(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let usage = self.today_usage().await?;
        let used = usage.total_tokens();
        if used >= self.daily_limit {
            warn!(used, limit = self.daily_limit, "Daily token budget exhausted");
            return Err(LecternError::BudgetExceeded {
                used,
                limit: self.daily_limit,
            });
        }
        Ok(())
    }

    /// Add one successful call's tokens to today's row.
    pub async fn record(&self, input_tokens: u64, output_tokens: u64) -> Result<UsageRecord> {
        let now = self.clock.now();
        let row = {
            let _writer = self.write_lock.lock().await;
            self.store
                .increment(now.date_naive(), input_tokens, output_tokens, now)
                .await?
        };
        debug!(
            date = %row.date,
            input_tokens,
            output_tokens,
            total_today = row.total_tokens(),
            "Recorded token usage"
        );
        Ok(row)
    }

    pub async fn record_usage(&self, usage: &UsageReport) -> Result<UsageRecord> {
        self.record(usage.input_tokens, usage.output_tokens).await
    }

    pub async fn status(&self) -> Result<BudgetStatus> {
        let usage = self.today_usage().await?;
        let used = usage.total_tokens();
        Ok(BudgetStatus {
            date: usage.date,
            used_tokens: used,
            daily_limit: self.daily_limit,
            remaining_tokens: self.daily_limit.saturating_sub(used),
            call_count: usage.call_count,
            enabled: self.enabled,
        })
    }
}
