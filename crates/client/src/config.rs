use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/partita.toml";

/// Client configuration, loaded from a TOML file plus `PARTITA_*`
/// environment overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the ledger API.
    pub base_url: String,
    /// Log filter level for the hosting binary.
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `path` (or the default location) merged
    /// with environment variables. A missing file is not an error.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("PARTITA"))
            .build()?;
        settings.try_deserialize()
    }
}
