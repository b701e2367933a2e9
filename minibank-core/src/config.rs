//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "bank": {
//!     "branchCode": "0001",
//!     "perWithdrawalLimit": 500,
//!     "dailyWithdrawalLimit": 3,
//!     "currencySymbol": "R$"
//!   }
//! }
//! ```
//! Keys this crate does not manage are kept when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::policy::{DEFAULT_DAILY_WITHDRAWAL_LIMIT, DEFAULT_PER_WITHDRAWAL_LIMIT};
use crate::domain::result::Error;
use crate::domain::{WithdrawalLimits, DEFAULT_BRANCH};

pub const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    bank: BankSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BankSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    branch_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    per_withdrawal_limit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    daily_withdrawal_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency_symbol: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Effective bank configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub branch_code: String,
    pub per_withdrawal_limit: Decimal,
    pub daily_withdrawal_limit: u32,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branch_code: DEFAULT_BRANCH.to_string(),
            per_withdrawal_limit: DEFAULT_PER_WITHDRAWAL_LIMIT,
            daily_withdrawal_limit: DEFAULT_DAILY_WITHDRAWAL_LIMIT,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing or unreadable settings file yields the defaults. Each bank
    /// setting can be overridden through the environment:
    /// `MINIBANK_BRANCH_CODE`, `MINIBANK_PER_WITHDRAWAL_LIMIT` and
    /// `MINIBANK_DAILY_WITHDRAWAL_LIMIT`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;
        let defaults = Self::default();

        let mut config = Self {
            branch_code: raw.bank.branch_code.unwrap_or(defaults.branch_code),
            per_withdrawal_limit: raw
                .bank
                .per_withdrawal_limit
                .unwrap_or(defaults.per_withdrawal_limit),
            daily_withdrawal_limit: raw
                .bank
                .daily_withdrawal_limit
                .unwrap_or(defaults.daily_withdrawal_limit),
            currency_symbol: raw.bank.currency_symbol.unwrap_or(defaults.currency_symbol),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(branch) = std::env::var("MINIBANK_BRANCH_CODE") {
            if !branch.trim().is_empty() {
                self.branch_code = branch.trim().to_string();
            }
        }
        if let Some(limit) = env_parse::<Decimal>("MINIBANK_PER_WITHDRAWAL_LIMIT") {
            self.per_withdrawal_limit = limit;
        }
        if let Some(limit) = env_parse::<u32>("MINIBANK_DAILY_WITHDRAWAL_LIMIT") {
            self.daily_withdrawal_limit = limit;
        }
    }

    /// Save config to the data directory, preserving unmanaged keys
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join(SETTINGS_FILE);
        let mut settings = read_settings(data_dir)?;

        settings.bank.branch_code = Some(self.branch_code.clone());
        settings.bank.per_withdrawal_limit = Some(self.per_withdrawal_limit);
        settings.bank.daily_withdrawal_limit = Some(self.daily_withdrawal_limit);
        settings.bank.currency_symbol = Some(self.currency_symbol.clone());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;
        Ok(())
    }

    /// Reject limits that would make every withdrawal fail
    pub fn validate(&self) -> std::result::Result<(), Error> {
        if self.branch_code.trim().is_empty() {
            return Err(Error::config("branch code cannot be empty"));
        }
        if self.per_withdrawal_limit <= Decimal::ZERO {
            return Err(Error::config("per-withdrawal limit must be positive"));
        }
        if self.daily_withdrawal_limit == 0 {
            return Err(Error::config("daily withdrawal limit must be at least 1"));
        }
        Ok(())
    }

    /// Limits for newly opened current accounts
    pub fn withdrawal_limits(&self) -> WithdrawalLimits {
        WithdrawalLimits {
            per_withdrawal: self.per_withdrawal_limit,
            daily_count: self.daily_withdrawal_limit,
        }
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
