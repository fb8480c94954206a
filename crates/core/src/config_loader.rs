use crate::config::AppConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering built-in defaults, TOML, environment
    /// variables, and JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the merged
    /// configuration fails validation.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the merged
    /// configuration fails validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let figment = Self::base()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("MSE_").split("__"))
            .join(Json::file("config/Config.json"));

        Self::extract(&figment)
    }

    /// Loads configuration from `path` with a profile overlay.
    ///
    /// The overlay lives next to `path`: `config/Config.toml` with profile
    /// `dev` reads `config/Config.dev.toml` on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the merged
    /// configuration fails validation.
    pub fn load_with_profile(path: impl AsRef<Path>, profile: &str) -> Result<AppConfig> {
        let path = path.as_ref();
        let overlay = Self::profile_path(path, profile);
        tracing::debug!(profile, overlay = %overlay.display(), "applying config profile");

        let figment = Self::base()
            .merge(Toml::file(path))
            .merge(Toml::file(overlay))
            .merge(Env::prefixed("MSE_").split("__"))
            .join(Json::file("config/Config.json"));

        Self::extract(&figment)
    }

    fn profile_path(path: &Path, profile: &str) -> PathBuf {
        let stem = path
            .file_stem()
            .map_or_else(|| "Config".into(), |s| s.to_string_lossy());
        path.with_file_name(format!("{stem}.{profile}.toml"))
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
    }

    fn extract(figment: &Figment) -> Result<AppConfig> {
        let config: AppConfig = figment.extract()?;
        config
            .validate()
            .context("configuration rejected during validation")?;

        tracing::debug!(
            window_size = config.statistics.window_size,
            state_path = %config.regime.state_path,
            "configuration loaded"
        );
        Ok(config)
    }
}
