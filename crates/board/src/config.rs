//! Board configuration, read from the environment.

use std::path::PathBuf;

use thiserror::Error;

use tablebook_core::DomainError;
use tablebook_reservations::{ConflictDetector, DEFAULT_CONFLICT_WINDOW_MINUTES, VenueCatalog};

pub const ENV_STORAGE_DIR: &str = "TABLEBOOK_STORAGE_DIR";
pub const ENV_STORAGE_KEY: &str = "TABLEBOOK_STORAGE_KEY";
pub const ENV_CONFLICT_WINDOW: &str = "TABLEBOOK_CONFLICT_WINDOW_MINUTES";
pub const ENV_CATALOG: &str = "TABLEBOOK_CATALOG";

pub const DEFAULT_STORAGE_KEY: &str = "milos-reservations";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TABLEBOOK_CONFLICT_WINDOW_MINUTES must be a positive, in-range number of minutes, got {0:?}")]
    InvalidConflictWindow(String),

    #[error("failed to read catalog file {path:?}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog: {0}")]
    Catalog(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Directory holding the persisted reservation file.
    pub storage_dir: PathBuf,
    /// Storage key (file stem) the collection is persisted under.
    pub storage_key: String,
    /// Minimum separation between bookings on the same table.
    pub conflict_window_minutes: i64,
    /// Optional JSON venue layout; the built-in venue is used when absent.
    pub catalog_path: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            conflict_window_minutes: DEFAULT_CONFLICT_WINDOW_MINUTES,
            catalog_path: None,
        }
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tablebook"))
        .unwrap_or_else(|| PathBuf::from(".tablebook"))
}

impl BoardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; unset or blank values fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        match get(ENV_STORAGE_DIR) {
            Some(dir) => config.storage_dir = PathBuf::from(dir),
            None => tracing::debug!(
                dir = %config.storage_dir.display(),
                "TABLEBOOK_STORAGE_DIR not set; using default storage directory"
            ),
        }

        if let Some(key) = get(ENV_STORAGE_KEY) {
            config.storage_key = key.trim().to_string();
        }

        if let Some(raw) = get(ENV_CONFLICT_WINDOW) {
            config.conflict_window_minutes = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|m| ConflictDetector::from_minutes(*m).is_ok())
                .ok_or(ConfigError::InvalidConflictWindow(raw))?;
        }

        config.catalog_path = get(ENV_CATALOG).map(PathBuf::from);

        Ok(config)
    }

    /// The venue layout: the configured file, or the built-in venue.
    pub fn load_catalog(&self) -> Result<VenueCatalog, ConfigError> {
        let Some(path) = &self.catalog_path else {
            return Ok(VenueCatalog::default_venue());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
            path: path.clone(),
            source,
        })?;
        Ok(VenueCatalog::from_json(&raw)?)
    }

    pub fn conflict_detector(&self) -> Result<ConflictDetector, ConfigError> {
        ConflictDetector::from_minutes(self.conflict_window_minutes).map_err(|_| {
            ConfigError::InvalidConflictWindow(self.conflict_window_minutes.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = BoardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.storage_key, "milos-reservations");
        assert_eq!(config.conflict_window_minutes, 90);
        assert!(config.catalog_path.is_none());
        assert!(config.storage_dir.ends_with("tablebook") || config.storage_dir.ends_with(".tablebook"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = BoardConfig::from_lookup(lookup(&[
            (ENV_STORAGE_DIR, "/tmp/board"),
            (ENV_STORAGE_KEY, " venue-two "),
            (ENV_CONFLICT_WINDOW, "120"),
            (ENV_CATALOG, "/etc/tablebook/venue.json"),
        ]))
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/tmp/board"));
        assert_eq!(config.storage_key, "venue-two");
        assert_eq!(config.conflict_window_minutes, 120);
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/tablebook/venue.json"))
        );
        assert_eq!(
            config.conflict_detector().unwrap().window(),
            chrono::Duration::minutes(120)
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = BoardConfig::from_lookup(lookup(&[
            (ENV_STORAGE_KEY, "   "),
            (ENV_CONFLICT_WINDOW, ""),
        ]))
        .unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.conflict_window_minutes, DEFAULT_CONFLICT_WINDOW_MINUTES);
    }

    #[test]
    fn non_positive_window_is_rejected() {
        for raw in ["0", "-30", "ninety"] {
            let err = BoardConfig::from_lookup(lookup(&[(ENV_CONFLICT_WINDOW, raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidConflictWindow(v) if v == raw));
        }
    }

    #[test]
    fn huge_window_is_a_config_error() {
        let raw = "9999999999999999";
        let err = BoardConfig::from_lookup(lookup(&[(ENV_CONFLICT_WINDOW, raw)])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConflictWindow(v) if v == raw));

        let config = BoardConfig {
            conflict_window_minutes: i64::MAX,
            ..BoardConfig::default()
        };
        assert!(matches!(
            config.conflict_detector(),
            Err(ConfigError::InvalidConflictWindow(_))
        ));
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let config = BoardConfig {
            catalog_path: Some(PathBuf::from("/definitely/not/here/venue.json")),
            ..BoardConfig::default()
        };
        assert!(matches!(
            config.load_catalog(),
            Err(ConfigError::CatalogRead { .. })
        ));
    }

    #[test]
    fn catalog_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("tablebook-catalog-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"areas":[{"name":"Bar","tables":["B1","B2"]}]}"#).unwrap();
        let config = BoardConfig {
            catalog_path: Some(path.clone()),
            ..BoardConfig::default()
        };

        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.first_area().name, "Bar");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn built_in_catalog_without_path() {
        let catalog = BoardConfig::default().load_catalog().unwrap();
        assert_eq!(catalog, VenueCatalog::default_venue());
    }
}
