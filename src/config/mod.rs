//! Configuration system (layered: defaults < TOML file < environment).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LecternError, Result};
use crate::models::ProviderKind;

/// Default daily token budget across all providers.
pub const DEFAULT_DAILY_TOKEN_LIMIT: u64 = 1_000_000;

/// Connection settings for one provider backend.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    /// Model id; the provider's default model when unset.
    pub model: Option<String>,
    /// Output token ceiling applied when a request does not set one.
    pub max_output_tokens: Option<u32>,
    pub base_url: Option<String>,
}

impl ProviderSettings {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Whether a non-blank API key is present.
    pub fn has_credentials(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Configuration for the generation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LecternConfig {
    pub daily_token_limit: u64,
    /// When false the budget check always passes; usage is still recorded.
    pub rate_limiting_enabled: bool,
    /// Preferred provider; falls back along `provider_priority`.
    pub default_provider: Option<ProviderKind>,
    pub provider_priority: Vec<ProviderKind>,
    pub anthropic: ProviderSettings,
    pub gemini: ProviderSettings,
    /// File for the durable usage ledger. In-memory when unset.
    pub ledger_path: Option<PathBuf>,
}

impl Default for LecternConfig {
    fn default() -> Self {
        Self {
            daily_token_limit: DEFAULT_DAILY_TOKEN_LIMIT,
            rate_limiting_enabled: true,
            default_provider: Some(ProviderKind::Anthropic),
            provider_priority: ProviderKind::DEFAULT_PRIORITY.to_vec(),
            anthropic: ProviderSettings::default(),
            gemini: ProviderSettings::default(),
            ledger_path: None,
        }
    }
}

impl LecternConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| LecternError::Configuration(e.to_string()))
    }

    /// Load a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    /// Defaults overlaid with environment variables (loads `.env` if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values from `lookup` (an environment-like key source).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = get("LECTERN_DAILY_TOKEN_LIMIT") {
            self.daily_token_limit = parse_number("LECTERN_DAILY_TOKEN_LIMIT", &raw)?;
        }
        if let Some(raw) = get("LECTERN_RATE_LIMITING_ENABLED") {
            self.rate_limiting_enabled = parse_bool("LECTERN_RATE_LIMITING_ENABLED", &raw)?;
        }
        if let Some(raw) = get("LECTERN_DEFAULT_PROVIDER") {
            self.default_provider = Some(raw.parse()?);
        }
        if let Some(raw) = get("LECTERN_PROVIDER_PRIORITY") {
            self.provider_priority = raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(raw) = get("LECTERN_LEDGER_PATH") {
            self.ledger_path = Some(PathBuf::from(raw));
        }

        let provider_vars = [
            (ProviderKind::Anthropic, "ANTHROPIC", &["ANTHROPIC_API_KEY"][..]),
            (ProviderKind::Gemini, "GEMINI", &["GEMINI_API_KEY", "GOOGLE_API_KEY"][..]),
        ];
        for (kind, prefix, key_vars) in provider_vars {
            let settings = self.provider_mut(kind);
            if let Some(key) = key_vars.iter().find_map(|var| get(*var)) {
                settings.api_key = Some(key);
            }
            if let Some(model) = get(&format!("{prefix}_MODEL")) {
                settings.model = Some(model);
            }
            let max_var = format!("{prefix}_MAX_OUTPUT_TOKENS");
            if let Some(raw) = get(&max_var) {
                settings.max_output_tokens = Some(parse_number(&max_var, &raw)?);
            }
            if let Some(url) = get(&format!("{prefix}_BASE_URL")) {
                settings.base_url = Some(url);
            }
        }
        Ok(())
    }

    pub fn provider(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Gemini => &self.gemini,
        }
    }

    pub fn provider_mut(&mut self, kind: ProviderKind) -> &mut ProviderSettings {
        match kind {
            ProviderKind::Anthropic => &mut self.anthropic,
            ProviderKind::Gemini => &mut self.gemini,
        }
    }

    /// Check if a provider has credentials configured.
    pub fn has_credentials(&self, kind: ProviderKind) -> bool {
        self.provider(kind).has_credentials()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| LecternError::Configuration(format!("{key} must be a non-negative integer, got '{raw}'")))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LecternError::Configuration(format!(
            "{key} must be a boolean, got '{raw}'"
        ))),
    }
}
