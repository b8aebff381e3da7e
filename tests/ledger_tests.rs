//! Usage ledger behavior under concurrency and across backends.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use lectern::config::LecternConfig;
use lectern::ledger::{FileUsageStore, FixedClock, UsageLedger};
use tempfile::TempDir;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_records_sum_exactly() {
    let ledger = Arc::new(UsageLedger::in_memory(u64::MAX));

    let mut handles = Vec::new();
    for i in 0..64u64 {
        let ledger = ledger.clone();
        handles.push(tokio::spawn(async move {
            ledger.record(i, 2 * i).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let today = ledger.today_usage().await.unwrap();
    let expected_input: u64 = (0..64).sum();
    assert_eq!(today.input_tokens, expected_input);
    assert_eq!(today.output_tokens, 2 * expected_input);
    assert_eq!(today.call_count, 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_records_on_file_store() {
    let dir = TempDir::new().unwrap();
    let ledger = Arc::new(UsageLedger::new(
        Arc::new(FileUsageStore::new(dir.path().join("usage.toml"))),
        1_000_000,
        true,
    ));

    let mut handles = Vec::new();
    for _ in 0..20 {
        let ledger = ledger.clone();
        handles.push(tokio::spawn(async move {
            ledger.record(10, 5).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let status = ledger.status().await.unwrap();
    assert_eq!(status.used_tokens, 300);
    assert_eq!(status.call_count, 20);
    assert_eq!(status.remaining_tokens, 1_000_000 - 300);
}

#[tokio::test]
async fn ledger_from_config_uses_file_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger").join("usage.toml");
    let config = LecternConfig {
        ledger_path: Some(path.clone()),
        daily_token_limit: 50,
        ..Default::default()
    };

    let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()));
    let ledger = UsageLedger::from_config(&config).with_clock(clock.clone());
    ledger.record(30, 20).await.unwrap();
    assert!(path.exists());
    assert!(!ledger.check_budget().await.unwrap());

    // A fresh ledger over the same file sees the same day.
    let reopened = UsageLedger::from_config(&config).with_clock(clock.clone());
    assert_eq!(reopened.today_usage().await.unwrap().total_tokens(), 50);

    clock.advance(chrono::Duration::days(1));
    assert!(reopened.check_budget().await.unwrap());
}
