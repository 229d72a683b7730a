//! Configuration types for stockroom.
//!
//! Configuration is loaded from a single YAML file. Every field has a default,
//! so an empty file (or no file at all) yields the stock setup: a low-stock
//! threshold of 5 and the three bootstrap accounts.
//!
//! ```yaml
//! low_stock_threshold: 5
//! accounts:
//!   - { username: admin, password: password123, role: admin }
//!   - { username: worker1, password: workerpass, role: worker }
//!   - { username: user, password: userpass, role: user }
//! audit:
//!   console: false
//! ```

pub mod audit;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::Role;

pub use audit::AuditConfig;

/// Default low-stock threshold.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 5;

/// Complete stockroom configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Products at or below this quantity are flagged as low stock.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u64,

    /// Accounts registered at startup.
    #[serde(default = "default_accounts")]
    pub accounts: Vec<AccountConfig>,

    /// Audit log settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: default_low_stock_threshold(),
            accounts: default_accounts(),
            audit: AuditConfig::default(),
        }
    }
}

/// An account seeded at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl AccountConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

fn default_low_stock_threshold() -> u64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

fn default_accounts() -> Vec<AccountConfig> {
    vec![
        AccountConfig::new("admin", "password123", Role::Admin),
        AccountConfig::new("worker1", "workerpass", Role::Worker),
        AccountConfig::new("user", "userpass", Role::User),
    ]
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    ///
    /// Blank content yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check account definitions for consistency.
    ///
    /// Workers and non-workers live in separate registries, so a username only
    /// has to be unique among accounts that land in the same one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut workers = HashSet::new();
        let mut others = HashSet::new();

        for account in &self.accounts {
            if account.username.trim().is_empty() {
                return Err(ConfigError::Config(
                    "account username must not be empty".to_string(),
                ));
            }

            let registry = if account.role == Role::Worker {
                &mut workers
            } else {
                &mut others
            };
            if !registry.insert(account.username.as_str()) {
                return Err(ConfigError::Config(format!(
                    "duplicate account username '{}'",
                    account.username
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_seed_bootstrap_accounts() {
        let config = AppConfig::default();
        assert_eq!(config.low_stock_threshold, 5);
        assert_eq!(config.accounts.len(), 3);
        assert_eq!(
            config.accounts[0],
            AccountConfig::new("admin", "password123", Role::Admin)
        );
        assert_eq!(config.accounts.iter().filter(|a| a.role == Role::Worker).count(), 1);
        assert!(!config.audit.console);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = AppConfig::from_yaml("   \n").unwrap();
        assert_eq!(config.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(config.accounts.len(), 3);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
low_stock_threshold: 2
accounts:
  - username: boss
    password: s3cret
    role: admin
  - username: picker
    password: pick
    role: worker
audit:
  console: true
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.low_stock_threshold, 2);
        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.accounts[1].role, Role::Worker);
        assert!(config.audit.console);
    }

    #[test]
    fn test_partial_config_keeps_default_accounts() {
        let config = AppConfig::from_yaml("low_stock_threshold: 10\n").unwrap();
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.accounts.len(), 3);
    }

    #[test]
    fn test_duplicate_username_in_same_registry_rejected() {
        let yaml = r#"
accounts:
  - { username: sam, password: a, role: worker }
  - { username: sam, password: b, role: worker }
"#;
        let err = AppConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Config(ref msg) if msg.contains("sam")));
    }

    #[test]
    fn test_same_username_across_registries_allowed() {
        let yaml = r#"
accounts:
  - { username: sam, password: a, role: worker }
  - { username: sam, password: b, role: user }
"#;
        assert!(AppConfig::from_yaml(yaml).is_ok());
    }

    #[test]
    fn test_empty_username_rejected() {
        let yaml = "accounts:\n  - { username: '', password: x, role: user }\n";
        assert!(matches!(
            AppConfig::from_yaml(yaml),
            Err(ConfigError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_role_is_yaml_error() {
        let yaml = "accounts:\n  - { username: a, password: x, role: manager }\n";
        assert!(matches!(AppConfig::from_yaml(yaml), Err(ConfigError::Yaml(_))));

        // Role names are lowercase only.
        let yaml = "accounts:\n  - { username: a, password: x, role: Admin }\n";
        assert!(matches!(AppConfig::from_yaml(yaml), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "low_stock_threshold: 7").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.low_stock_threshold, 7);
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
