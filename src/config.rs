use crate::search::SearchSite;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Optional config file read from the working directory
pub const CONFIG_FILE: &str = "rental-search.toml";

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub site: SearchSite,
}

impl AppConfig {
    /// Load settings with precedence ENV > `rental-search.toml` > defaults.
    ///
    /// Environment keys use the `RENTAL` prefix and `__` separator,
    /// e.g. `RENTAL__SITE__AFFILIATE_ID=partner42`.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("RENTAL").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.site.validate().context("Invalid search site settings")?;
        debug!(
            "Loaded configuration: domain={}, affiliate_id={}",
            config.site.domain, config.site.affiliate_id
        );

        Ok(config)
    }
}
