//! Start-up configuration for the binaries.
//!
//! Each book starts from its preset, optionally replaced by a JSON config
//! file, then adjusted by individual environment variables.

use std::path::Path;

use shopkeep_store::{ConfigError, LoadMode, PersistencePolicy, StoreConfig};

/// Path of a JSON [`StoreConfig`] file.
pub const CONFIG_ENV: &str = "SHOPKEEP_CONFIG";
/// Overrides the persistence policy (`on-demand` | `after-every-mutation`).
pub const PERSISTENCE_ENV: &str = "SHOPKEEP_PERSISTENCE";
/// Overrides the load mode (`replace` | `append`).
pub const LOAD_MODE_ENV: &str = "SHOPKEEP_LOAD_MODE";
/// Overrides the inventory file.
pub const INVENTORY_FILE_ENV: &str = "SHOPKEEP_INVENTORY_FILE";

pub const DEFAULT_INVENTORY_FILE: &str = "inventario.json";

fn resolve(
    preset: StoreConfig,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<StoreConfig, ConfigError> {
    let mut config = match lookup(CONFIG_ENV) {
        Some(path) => {
            tracing::info!(path = %path, "reading store config file");
            StoreConfig::from_json_file(Path::new(&path))?
        }
        None => preset,
    };

    if let Some(policy) = lookup(PERSISTENCE_ENV) {
        config.policy = policy.parse::<PersistencePolicy>()?;
    }
    if let Some(mode) = lookup(LOAD_MODE_ENV) {
        config.load_mode = mode.parse::<LoadMode>()?;
    }
    Ok(config)
}

/// Sales book configuration. `lookup` reads an environment variable.
pub fn sales_config(lookup: impl Fn(&str) -> Option<String>) -> Result<StoreConfig, ConfigError> {
    let config = resolve(StoreConfig::sales(), &lookup)?;
    config.validate()?;
    Ok(config)
}

/// Inventory book configuration. `lookup` reads an environment variable.
pub fn inventory_config(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<StoreConfig, ConfigError> {
    let mut config = resolve(StoreConfig::inventory(DEFAULT_INVENTORY_FILE), &lookup)?;
    match lookup(INVENTORY_FILE_ENV) {
        Some(path) => config.path = Some(path.into()),
        None if config.path.is_none() => {
            tracing::info!("{INVENTORY_FILE_ENV} not set; using {DEFAULT_INVENTORY_FILE}");
            config.path = Some(DEFAULT_INVENTORY_FILE.into());
        }
        None => {}
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn presets_apply_without_environment() {
        assert_eq!(sales_config(env(&[])).unwrap(), StoreConfig::sales());
        assert_eq!(
            inventory_config(env(&[])).unwrap(),
            StoreConfig::inventory(DEFAULT_INVENTORY_FILE)
        );
    }

    #[test]
    fn environment_overrides_policy_and_file() {
        let config = inventory_config(env(&[
            (INVENTORY_FILE_ENV, "/tmp/stock.json"),
            (PERSISTENCE_ENV, "on-demand"),
        ]))
        .unwrap();
        assert_eq!(config.path.as_deref(), Some(Path::new("/tmp/stock.json")));
        assert_eq!(config.policy, PersistencePolicy::OnDemand);
        assert_eq!(config.load_mode, LoadMode::Replace);
    }

    #[test]
    fn sales_cannot_auto_save_without_a_file() {
        let err = sales_config(env(&[(PERSISTENCE_ENV, "after-every-mutation")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPath));

        let err = sales_config(env(&[(PERSISTENCE_ENV, "hourly")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPolicy(_)));
    }

    #[test]
    fn load_mode_can_be_switched() {
        let config = sales_config(env(&[(LOAD_MODE_ENV, "replace")])).unwrap();
        assert_eq!(config.load_mode, LoadMode::Replace);
    }

    #[test]
    fn config_file_without_path_gets_default_inventory_file() {
        let path = std::env::temp_dir().join(format!("shopkeep-cli-config-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(&path, r#"{ "policy": "after-every-mutation", "load_mode": "append" }"#).unwrap();
        let path_str = path.display().to_string();
        let result = inventory_config(env(&[(CONFIG_ENV, path_str.as_str())]));
        let _ = std::fs::remove_file(&path);

        let config = result.unwrap();
        assert_eq!(config.path.as_deref(), Some(Path::new(DEFAULT_INVENTORY_FILE)));
        assert_eq!(config.load_mode, LoadMode::Append);
    }
}
