//! Service settings
//!
//! Built-in defaults, then an optional config file, then `CLIMATE__*`
//! environment variables (`CLIMATE__SERVER__PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use storage::{StoreConfig, DEFAULT_WINDOW_DAYS};

/// Config file looked up when `CLIMATE_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "config/climate-api";

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: StoreConfig,
    pub api: ApiSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Raises log verbosity to DEBUG
    pub debug: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            debug: false,
        }
    }
}

impl ServerSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Query defaults used by the handlers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Station served by `/api/v1.0/tobs`
    pub featured_station: String,
    /// Upper bound for `/api/v1.0/<start>`
    pub default_end_date: String,
    /// Trailing window length in days
    pub window_days: i64,
    /// Answer "not found" with 200 and treat a zero minimum as missing
    pub legacy_not_found: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            featured_station: "USC00519281".to_string(),
            default_end_date: "2017-08-23".to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            legacy_not_found: true,
        }
    }
}

/// Load settings, reading the file named by `CLIMATE_CONFIG` if set
pub fn load() -> Result<Settings, ConfigError> {
    match std::env::var("CLIMATE_CONFIG") {
        Ok(path) => load_from(&path, true),
        Err(_) => load_from(DEFAULT_CONFIG_FILE, false),
    }
}

/// Load settings layered over the file at `path`
pub fn load_from(path: &str, required: bool) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&Settings::default())?)
        .add_source(File::with_name(path).required(required))
        .add_source(
            Environment::with_prefix("CLIMATE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.addr(), "127.0.0.1:5000");
        assert_eq!(settings.api.featured_station, "USC00519281");
        assert_eq!(settings.api.default_end_date, "2017-08-23");
        assert_eq!(settings.api.window_days, 366);
        assert!(settings.api.legacy_not_found);
    }

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let settings = load_from("config/does-not-exist", false).unwrap();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.database.url, "sqlite://Resources/hawaii.sqlite");
    }

    #[test]
    fn test_missing_required_file_fails() {
        assert!(load_from("config/does-not-exist", true).is_err());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("climate-api-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[server]\nport = 8080\ndebug = true\n\n[api]\nlegacy_not_found = false\n",
        )
        .unwrap();

        let settings = load_from(path.to_str().unwrap(), true).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 8080);
        assert!(settings.server.debug);
        assert!(!settings.api.legacy_not_found);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.api.window_days, 366);
    }

    #[test]
    fn test_config_path_and_env_layers() {
        let path = std::env::temp_dir().join(format!("climate-api-env-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[server]\nport = 8081\n\n[api]\nfeatured_station = \"USC00519397\"\n",
        )
        .unwrap();

        // Keys set here are disjoint from those the other loader tests assert on
        std::env::set_var("CLIMATE_CONFIG", &path);
        std::env::set_var("CLIMATE__API__FEATURED_STATION", "USC00513117");
        let settings = load();
        std::env::remove_var("CLIMATE_CONFIG");
        std::env::remove_var("CLIMATE__API__FEATURED_STATION");
        std::fs::remove_file(&path).ok();

        let settings = settings.unwrap();
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.api.featured_station, "USC00513117");
        assert_eq!(settings.api.default_end_date, "2017-08-23");
    }
}
