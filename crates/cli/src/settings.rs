use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/scontrino.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the current bill is stored between invocations.
    pub session_path: String,
    /// Cosmetic prefix for printed amounts; never enters the arithmetic.
    pub currency_symbol: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_path: "config/session.json".to_string(),
            currency_symbol: "฿".to_string(),
            level: "info".to_string(),
        }
    }
}

/// Layers the TOML file (optional) under `SCONTRINO_*` environment
/// variables. CLI flags override individual fields afterwards in `main`.
pub fn load(config_path: Option<&str>) -> Result<AppConfig> {
    let config_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SCONTRINO"));
    Ok(builder.build()?.try_deserialize()?)
}
