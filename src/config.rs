use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::env;
use std::time::Duration;
use config; // Explicitly import the config crate

#[derive(Debug, Deserialize, Clone)]
pub struct LatencyConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl LatencyConfig {
    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self { min_ms: 100, max_ms: 600 }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    pub latency: LatencyConfig,
    // These fields will be populated from the .env file
    pub database_path: String,
    pub log_level: String,
    #[serde(default)]
    pub fixtures_path: Option<String>,
}

impl PortalConfig {
    pub fn from_env(env_path: &Path) -> Result<Self, config::ConfigError> {
        dotenvy::from_path(env_path)
            .map_err(|e| config::ConfigError::Message(format!(
                "FATAL: Failed to load .env file from '{}'. Error: {}", env_path.display(), e
            )))?;

        let database_path = env::var("DATABASE_PATH")
            .map_err(|_| config::ConfigError::Message(
                "FATAL: Environment variable 'DATABASE_PATH' is not set in your .env file.".to_string()
            ))?;

        if Path::new(&database_path).is_relative() {
            return Err(config::ConfigError::Message(format!(
                "FATAL: The 'DATABASE_PATH' in your .env file is a relative path ('{}'). It MUST be an absolute path.",
                database_path
            )));
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let fixtures_path = env::var("FIXTURES_PATH").ok().filter(|p| !p.trim().is_empty());
        if let Some(path) = &fixtures_path {
            if Path::new(path).is_relative() {
                return Err(config::ConfigError::Message(format!(
                    "FATAL: The 'FIXTURES_PATH' in your .env file is a relative path ('{}'). It MUST be an absolute path.",
                    path
                )));
            }
        }

        let defaults = LatencyConfig::default();
        let mut builder = config::Config::builder()
            .set_default("latency.min_ms", defaults.min_ms as i64)?
            .set_default("latency.max_ms", defaults.max_ms as i64)?
            // Optional base settings; the env overrides below always win.
            .add_source(config::File::new("config/default.toml", config::FileFormat::Toml).required(false))
            .set_override("database_path", database_path)?
            .set_override("log_level", log_level)?;

        if let Some(min_ms) = read_millis("LATENCY_MIN_MS")? {
            builder = builder.set_override("latency.min_ms", min_ms)?;
        }
        if let Some(max_ms) = read_millis("LATENCY_MAX_MS")? {
            builder = builder.set_override("latency.max_ms", max_ms)?;
        }
        if let Some(path) = fixtures_path {
            builder = builder.set_override("fixtures_path", path)?;
        }

        let portal_config: PortalConfig = builder.build()?.try_deserialize()?;

        if portal_config.latency.min_ms > portal_config.latency.max_ms {
            return Err(config::ConfigError::Message(format!(
                "FATAL: 'LATENCY_MIN_MS' ({}) must not exceed 'LATENCY_MAX_MS' ({}).",
                portal_config.latency.min_ms, portal_config.latency.max_ms
            )));
        }

        Ok(portal_config)
    }

    /// Returns the full path to the submission ledger database inside its own folder.
    pub fn ledger_db_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
            .join("ledger")
            .join("ledger.db")
    }
}

fn read_millis(key: &str) -> Result<Option<i64>, config::ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<u32>()
            .map(|ms| Some(ms as i64))
            .map_err(|_| config::ConfigError::Message(format!(
                "FATAL: '{}' must be a whole number of milliseconds, got '{}'.", key, raw
            ))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // The only test in the crate that touches process environment variables.
    #[test]
    fn from_env_reads_paths_and_latency_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let db_dir = dir.path().join("data");
        let env_path = dir.path().join(".env");
        let mut file = std::fs::File::create(&env_path).unwrap();
        writeln!(file, "DATABASE_PATH={}", db_dir.display()).unwrap();
        writeln!(file, "LOG_LEVEL=debug").unwrap();
        writeln!(file, "LATENCY_MIN_MS=5").unwrap();
        writeln!(file, "LATENCY_MAX_MS=25").unwrap();
        drop(file);

        let config = PortalConfig::from_env(&env_path).unwrap();
        assert_eq!(config.database_path, db_dir.display().to_string());
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.latency.min(), Duration::from_millis(5));
        assert_eq!(config.latency.max(), Duration::from_millis(25));
        assert!(config.fixtures_path.is_none());
        assert_eq!(config.ledger_db_path(), db_dir.join("ledger").join("ledger.db"));
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let err = PortalConfig::from_env(Path::new("/definitely/not/here/.env")).unwrap_err();
        assert!(err.to_string().contains("Failed to load .env file"));
    }
}
