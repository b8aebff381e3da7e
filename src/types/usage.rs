//! Token usage reports and the per-day ledger row.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Token usage for a single provider call, normalized across providers.
///
/// Cache counters are informational; only input and output tokens count
/// against the daily budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UsageReport {
    pub input_tokens: u64,
    pub output_tokens: u64,
    #[serde(default)]
    pub cache_read_tokens: u64,
    #[serde(default)]
    pub cache_write_tokens: u64,
}

impl UsageReport {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            ..Default::default()
        }
    }

    /// Tokens billed against the budget.
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Cumulative usage for one UTC calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageRecord {
    pub date: NaiveDate,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub call_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UsageRecord {
    /// A zeroed row for `date`, as created lazily on the first call of a day.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            input_tokens: 0,
            output_tokens: 0,
            call_count: 0,
            updated_at: None,
        }
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }

    /// Add one call's tokens to this row.
    pub fn apply(&mut self, input_tokens: u64, output_tokens: u64, at: DateTime<Utc>) {
        self.input_tokens = self.input_tokens.saturating_add(input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(output_tokens);
        self.call_count += 1;
        self.updated_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_ignores_cache_counters() {
        let report = UsageReport {
            input_tokens: 100,
            output_tokens: 50,
            cache_read_tokens: 900,
            cache_write_tokens: 40,
        };
        assert_eq!(report.total_tokens(), 150);
    }

    #[test]
    fn apply_accumulates_and_counts_calls() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut record = UsageRecord::empty(date);
        record.apply(10, 5, Utc::now());
        record.apply(1, 2, Utc::now());
        assert_eq!(record.input_tokens, 11);
        assert_eq!(record.output_tokens, 7);
        assert_eq!(record.call_count, 2);
        assert_eq!(record.total_tokens(), 18);
        assert!(record.updated_at.is_some());
    }
}
