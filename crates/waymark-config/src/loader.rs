use std::path::Path;

use tracing::info;
use waymark_common::{Error, Result};

use crate::model::DatabaseConfig;

/// Environment variable selecting which `database.yml` entry to use.
pub const ENV_VAR: &str = "WAYMARK_ENV";

/// Environment assumed when `WAYMARK_ENV` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Read and parse a `database.yml` file.
pub fn load(path: &Path) -> Result<DatabaseConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    let config = from_str(&contents)?;
    info!("loaded database config from {}", path.display());
    Ok(config)
}

/// Parse `database.yml` contents.
pub fn from_str(contents: &str) -> Result<DatabaseConfig> {
    serde_yaml::from_str(contents)
        .map_err(|e| Error::Config(format!("malformed database config: {e}")))
}

/// The environment named by `WAYMARK_ENV`, or the default when unset.
pub fn active_environment() -> String {
    std::env::var(ENV_VAR).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string())
}

#[cfg(test)]
mod tests {
    use waymark_common::Error;

    use super::{from_str, load};

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = from_str("development: [not, a, mapping]").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("malformed database config"));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load(std::path::Path::new("does/not/exist.yml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("does/not/exist.yml"));
    }
}
