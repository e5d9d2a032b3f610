//! Store configuration: where the collection lives and when it is written.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// When the store writes its bound file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistencePolicy {
    /// Only on an explicit `save`/`persist` call.
    #[default]
    OnDemand,
    /// After every successful add/remove/replace/update.
    AfterEveryMutation,
}

/// What `load` does with records already in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadMode {
    /// Loaded records replace the current contents.
    #[default]
    Replace,
    /// Loaded records are appended after the current contents.
    Append,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown persistence policy {0:?} (expected `on-demand` or `after-every-mutation`)")]
    UnknownPolicy(String),

    #[error("unknown load mode {0:?} (expected `replace` or `append`)")]
    UnknownLoadMode(String),

    #[error("policy `after-every-mutation` requires a file path")]
    MissingPath,

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FromStr for PersistencePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on-demand" => Ok(Self::OnDemand),
            "after-every-mutation" => Ok(Self::AfterEveryMutation),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

impl FromStr for LoadMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            other => Err(ConfigError::UnknownLoadMode(other.to_string())),
        }
    }
}

/// Store configuration.
///
/// Deserializes from a JSON object; missing keys take their defaults:
///
/// ```json
/// { "path": "inventario.json", "policy": "after-every-mutation", "load_mode": "replace" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// File bound to the store (loaded by `open`, written by `persist` and auto-save).
    pub path: Option<PathBuf>,
    pub policy: PersistencePolicy,
    pub load_mode: LoadMode,
}

impl StoreConfig {
    /// Sales book: explicit saves, loads append to what is in memory.
    pub fn sales() -> Self {
        Self {
            path: None,
            policy: PersistencePolicy::OnDemand,
            load_mode: LoadMode::Append,
        }
    }

    /// Inventory book: bound to one file, written after every change.
    pub fn inventory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            policy: PersistencePolicy::AfterEveryMutation,
            load_mode: LoadMode::Replace,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_policy(mut self, policy: PersistencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_load_mode(mut self, load_mode: LoadMode) -> Self {
        self.load_mode = load_mode;
        self
    }

    /// Read a JSON config file. The result is not validated; callers may
    /// still fill in a path before calling [`StoreConfig::validate`].
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy == PersistencePolicy::AfterEveryMutation && self.path.is_none() {
            return Err(ConfigError::MissingPath);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_each_book() {
        let sales = StoreConfig::sales();
        assert_eq!(sales.policy, PersistencePolicy::OnDemand);
        assert_eq!(sales.load_mode, LoadMode::Append);
        assert!(sales.validate().is_ok());

        let inventory = StoreConfig::inventory("inventario.json");
        assert_eq!(inventory.path.as_deref(), Some(Path::new("inventario.json")));
        assert_eq!(inventory.policy, PersistencePolicy::AfterEveryMutation);
        assert_eq!(inventory.load_mode, LoadMode::Replace);
    }

    #[test]
    fn policy_parses_from_kebab_case() {
        assert_eq!(
            "After-Every-Mutation".parse::<PersistencePolicy>().unwrap(),
            PersistencePolicy::AfterEveryMutation
        );
        assert!(matches!(
            "sometimes".parse::<PersistencePolicy>(),
            Err(ConfigError::UnknownPolicy(_))
        ));
        assert_eq!("append".parse::<LoadMode>().unwrap(), LoadMode::Append);
    }

    #[test]
    fn auto_save_without_path_is_rejected() {
        let config = StoreConfig::sales().with_policy(PersistencePolicy::AfterEveryMutation);
        assert!(matches!(config.validate(), Err(ConfigError::MissingPath)));
    }

    #[test]
    fn json_config_fills_missing_keys_with_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{ "load_mode": "append" }"#).unwrap();
        assert_eq!(config, StoreConfig::default().with_load_mode(LoadMode::Append));
    }

    #[test]
    fn json_config_file_is_read_before_validation() {
        let path = std::env::temp_dir().join(format!("shopkeep-config-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(&path, r#"{ "policy": "after-every-mutation" }"#).unwrap();
        let result = StoreConfig::from_json_file(&path);
        let _ = std::fs::remove_file(&path);
        let config = result.unwrap();
        assert_eq!(config.policy, PersistencePolicy::AfterEveryMutation);
        assert!(matches!(config.validate(), Err(ConfigError::MissingPath)));

        let missing = StoreConfig::from_json_file(Path::new("/nonexistent/shopkeep.json"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
