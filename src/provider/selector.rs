//! Static provider selection: preferred default, then a fixed priority order.

use std::sync::Arc;

use tracing::debug;

use crate::config::LecternConfig;
use crate::error::{LecternError, Result};
use crate::models::ProviderKind;

use super::{create_client, ProviderClient};

/// Holds the registered clients in priority order.
pub struct ProviderSelector {
    clients: Vec<Arc<dyn ProviderClient>>,
    default: Option<ProviderKind>,
}

impl std::fmt::Debug for ProviderSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<ProviderKind> = self.clients.iter().map(|c| c.kind()).collect();
        f.debug_struct("ProviderSelector")
            .field("clients", &kinds)
            .field("default", &self.default)
            .finish()
    }
}

impl ProviderSelector {
    /// `clients` must already be in fallback priority order.
    pub fn new(clients: Vec<Arc<dyn ProviderClient>>, default: Option<ProviderKind>) -> Self {
        Self { clients, default }
    }

    /// Build the built-in clients following `provider_priority`.
    pub fn from_config(config: &LecternConfig) -> Self {
        let priority: &[ProviderKind] = if config.provider_priority.is_empty() {
            &ProviderKind::DEFAULT_PRIORITY
        } else {
            &config.provider_priority
        };

        let mut seen = Vec::new();
        let mut clients = Vec::new();
        for kind in priority {
            if seen.contains(kind) {
                continue;
            }
            seen.push(*kind);
            if let Some(client) = create_client(*kind, config) {
                clients.push(client);
            }
        }

        Self::new(clients, config.default_provider)
    }

    /// The client to use for the next call.
    pub fn get(&self) -> Result<Arc<dyn ProviderClient>> {
        if let Some(default) = self.default {
            if let Some(client) = self
                .clients
                .iter()
                .find(|c| c.kind() == default && c.is_configured())
            {
                return Ok(client.clone());
            }
            debug!(provider = %default, "Default provider not configured, falling back");
        }

        self.clients
            .iter()
            .find(|c| c.is_configured())
            .cloned()
            .ok_or(LecternError::NoProviderConfigured)
    }

    /// Kinds of every configured client, in priority order.
    pub fn configured(&self) -> Vec<ProviderKind> {
        self.clients
            .iter()
            .filter(|c| c.is_configured())
            .map(|c| c.kind())
            .collect()
    }
}
