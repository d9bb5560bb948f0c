use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

const DEFAULT_PORT: u16 = 8000;

const fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// PostgreSQL connection string. Notes are kept in memory when unset.
    #[serde(default)]
    pub database_dsn: Option<String>,
}

/// Applies `NOTES_API_PORT` and `PG_DSN` on top of whatever a config file set.
fn apply_env_overrides(
    mut config: Config,
    port: Option<String>,
    database_dsn: Option<String>,
) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(port) = port {
        config.port = port
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse NOTES_API_PORT: {e}"))?;
    }

    if let Some(dsn) = database_dsn.filter(|dsn| !dsn.is_empty()) {
        config.database_dsn = Some(dsn);
    }

    Ok(config)
}

fn load_from_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

fn load_file_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = env::var("NOTES_API_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return load_from_file("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return load_from_file("config.example.yaml");
    }

    tracing::info!("No config file found, loading configuration from environment variables");
    Ok(Config {
        port: DEFAULT_PORT,
        database_dsn: None,
    })
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config = load_file_config()?;

    // Environment always wins over file values
    apply_env_overrides(
        config,
        env::var("NOTES_API_PORT").ok(),
        env::var("PG_DSN").ok(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_fields_default_when_missing() {
        let cfg: Config = serde_yaml::from_str("{}").unwrap();

        assert_eq!(cfg.port, DEFAULT_PORT);
        assert!(cfg.database_dsn.is_none());
    }

    #[test]
    fn yaml_with_database() {
        let cfg: Config = serde_yaml::from_str(
            "port: 9090\ndatabase_dsn: host=localhost user=notes dbname=notes\n",
        )
        .unwrap();

        assert_eq!(cfg.port, 9090);
        assert_eq!(
            cfg.database_dsn.as_deref(),
            Some("host=localhost user=notes dbname=notes")
        );
    }

    #[test]
    fn yaml_rejects_bad_port() {
        assert!(serde_yaml::from_str::<Config>("port: 99999").is_err());
    }

    #[test]
    fn env_values_override_file_values() {
        let file: Config = serde_yaml::from_str("port: 8000\n").unwrap();

        let cfg = apply_env_overrides(
            file,
            Some("9000".to_string()),
            Some("host=db user=notes".to_string()),
        )
        .unwrap();

        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.database_dsn.as_deref(), Some("host=db user=notes"));
    }

    #[test]
    fn unset_or_empty_env_keeps_file_values() {
        let file: Config =
            serde_yaml::from_str("port: 8100\ndatabase_dsn: host=file\n").unwrap();

        let cfg = apply_env_overrides(file, None, Some(String::new())).unwrap();

        assert_eq!(cfg.port, 8100);
        assert_eq!(cfg.database_dsn.as_deref(), Some("host=file"));
    }

    #[test]
    fn example_file_with_pg_dsn_uses_database() {
        let example = fs::read_to_string(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.yaml"),
        )
        .unwrap();
        let file: Config = serde_yaml::from_str(&example).unwrap();
        assert!(file.database_dsn.is_none());

        let cfg = apply_env_overrides(file, None, Some("host=db user=notes".to_string())).unwrap();

        assert_eq!(cfg.database_dsn.as_deref(), Some("host=db user=notes"));
    }

    #[test]
    fn bad_port_override_is_an_error() {
        let file: Config = serde_yaml::from_str("{}").unwrap();

        assert!(apply_env_overrides(file, Some("eighty".to_string()), None).is_err());
    }
}
