use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use waymark_common::{Error, Result};

/// Settings for one ledger store, as written in `database.yml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the SQLite file backing the version ledger.
    pub database: PathBuf,
}

/// Parsed `database.yml`: one store entry per environment.
///
/// ```yaml
/// development:
///   database: tmp/waymark_dev.sqlite3
/// test:
///   database: tmp/waymark_test.sqlite3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseConfig {
    environments: BTreeMap<String, StoreConfig>,
}

impl DatabaseConfig {
    /// Look up the store settings for one environment.
    pub fn environment(&self, name: &str) -> Result<&StoreConfig> {
        self.environments.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.environments.keys().map(String::as_str).collect();
            Error::Config(format!(
                "environment {name:?} not present in database config (have: {})",
                known.join(", ")
            ))
        })
    }

    /// Names of all configured environments, sorted.
    pub fn environments(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use crate::loader::from_str;

    const SAMPLE: &str = "\
development:
  database: tmp/waymark_dev.sqlite3
test:
  database: tmp/waymark_test.sqlite3
";

    #[test]
    fn environment_lookup_returns_store_settings() {
        let config = from_str(SAMPLE).unwrap();
        let store = config.environment("test").unwrap();
        assert_eq!(
            store.database,
            std::path::PathBuf::from("tmp/waymark_test.sqlite3")
        );
    }

    #[test]
    fn unknown_environment_error_names_known_ones() {
        let config = from_str(SAMPLE).unwrap();
        let err = config.environment("production").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("production"));
        assert!(message.contains("development"));
        assert!(message.contains("test"));
    }

    #[test]
    fn environments_are_listed_sorted() {
        let config = from_str(SAMPLE).unwrap();
        let names: Vec<&str> = config.environments().collect();
        assert_eq!(names, vec!["development", "test"]);
    }
}
