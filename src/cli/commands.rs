//! Handlers for CLI subcommands.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::GenerateArgs;
use crate::config::LecternConfig;
use crate::error::Result;
use crate::generation::GenerationService;
use crate::ledger::{FileUsageStore, UsageLedger};
use crate::provider::ProviderSelector;
use crate::types::{GenerationRequest, SourceDocument};

/// Ledger backed by `LECTERN_LEDGER_PATH`, or `~/.lectern/usage.toml`.
fn cli_ledger(config: &LecternConfig) -> UsageLedger {
    let path = config
        .ledger_path
        .clone()
        .unwrap_or_else(FileUsageStore::default_path);
    debug!(path = %path.display(), "Using usage ledger");
    UsageLedger::new(
        Arc::new(FileUsageStore::new(path)),
        config.daily_token_limit,
        config.rate_limiting_enabled,
    )
}

/// Read the input files, generate the artifact, and print it as JSON.
pub async fn handle_generate(args: GenerateArgs) -> Result<()> {
    let mut config = LecternConfig::from_env()?;
    if let Some(provider) = args.provider {
        config.default_provider = Some(provider);
    }

    let mut documents = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let text = tokio::fs::read_to_string(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        documents.push(SourceDocument::new(file_name, text));
    }

    let service = GenerationService::new(
        Arc::new(cli_ledger(&config)),
        ProviderSelector::from_config(&config),
    );
    let request = GenerationRequest::new(documents, args.options());

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling generation");
            on_interrupt.cancel();
        }
    });

    let artifact = service.generate(&request, &cancel).await?;
    println!("{}", serde_json::to_string_pretty(&artifact)?);
    Ok(())
}

/// Print today's ledger status.
pub async fn handle_usage() -> Result<()> {
    let config = LecternConfig::from_env()?;
    let status = cli_ledger(&config).status().await?;

    println!("Date:       {}", status.date);
    println!("Used:       {} tokens", status.used_tokens);
    println!("Limit:      {} tokens", status.daily_limit);
    println!("Remaining:  {} tokens", status.remaining_tokens);
    println!("Calls:      {}", status.call_count);
    println!(
        "Budget:     {}",
        if status.enabled { "enforced" } else { "disabled" }
    );
    Ok(())
}
