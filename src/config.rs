//! Configuration handling for the TUI

use crate::state::TransactionType;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// JSON file the ledger is mirrored to (in-memory only when unset)
    pub ledger_path: Option<String>,
    /// Type preselected in a fresh new transaction form
    pub default_type: Option<TransactionType>,
    /// Prefix used when displaying prices
    pub currency_symbol: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "tally", "tally-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                tracing::info!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol.as_deref().unwrap_or("$")
    }

    /// Ledger path, honoring `TALLY_LEDGER_PATH` over the config file
    pub fn ledger_path(&self) -> Option<PathBuf> {
        std::env::var("TALLY_LEDGER_PATH")
            .ok()
            .or_else(|| self.ledger_path.clone())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.ledger_path.is_none());
        assert!(config.default_type.is_none());
        assert_eq!(config.currency_symbol(), "$");
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            ledger_path: Some("/tmp/ledger.json".to_string()),
            default_type: Some(TransactionType::Outcome),
            currency_symbol: Some("R$".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"outcome\""));
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.ledger_path, Some("/tmp/ledger.json".to_string()));
        assert_eq!(parsed.default_type, Some(TransactionType::Outcome));
        assert_eq!(parsed.currency_symbol(), "R$");
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.default_type.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"default_type": "income", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.default_type, Some(TransactionType::Income));
    }

    #[test]
    fn test_invalid_default_type_is_rejected() {
        let json = r#"{"default_type": "expense"}"#;
        assert!(serde_json::from_str::<TuiConfig>(json).is_err());
    }

    #[test]
    fn test_load_returns_ok_when_no_file() {
        // May read a real config file if one exists on this machine
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
