use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::cache::RefreshPolicy;

pub static CONFIG_PATH: Lazy<&'static Path> = Lazy::new(|| {
    Path::new(option_env!("FACEGATE_CONFIG_PATH").unwrap_or("/usr/local/etc/facegate/config.toml"))
});

pub static GALLERY_STORE_PREFIX: Lazy<&'static Path> = Lazy::new(|| {
    Path::new(option_env!("FACEGATE_STORE_PREFIX").unwrap_or("/usr/local/etc/facegate"))
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum L2 distance accepted as a positive match.
    pub tolerance: f32,
    /// Seconds a built snapshot may be reused; 0 rebuilds every call.
    pub refresh_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 0.5,
            refresh_secs: 0,
        }
    }
}

impl Config {
    pub fn refresh_policy(&self) -> RefreshPolicy {
        if self.refresh_secs == 0 {
            RefreshPolicy::EveryCall
        } else {
            RefreshPolicy::Ttl(Duration::from_secs(self.refresh_secs))
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or(&CONFIG_PATH);
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config at {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<()> {
    let path = path.unwrap_or(&CONFIG_PATH);
    let data = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RefreshPolicy;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_config(Some(Path::new("/nonexistent/facegate/config.toml"))).unwrap();
        assert_eq!(cfg.tolerance, 0.5);
        assert_eq!(cfg.refresh_secs, 0);
        assert_eq!(cfg.refresh_policy(), RefreshPolicy::EveryCall);
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = std::env::temp_dir().join(format!("facegate-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        let cfg = Config {
            tolerance: 0.42,
            refresh_secs: 30,
        };
        save_config(&cfg, Some(&path)).unwrap();
        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.tolerance, 0.42);
        assert_eq!(loaded.refresh_secs, 30);
        assert_eq!(
            loaded.refresh_policy(),
            RefreshPolicy::Ttl(Duration::from_secs(30))
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
