use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Deadline applied when the command line does not give one.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    60
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    load_from(Path::new("checkrun.toml"))
}

fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    let mut cfg = if path.exists() {
        let s = std::fs::read_to_string(path)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // env overrides (minimal)
    if let Ok(v) = std::env::var("CHECKRUN_TIMEOUT") {
        if let Ok(secs) = v.trim().parse::<u64>() {
            cfg.defaults.timeout = secs;
        }
    }

    Ok(cfg)
}
