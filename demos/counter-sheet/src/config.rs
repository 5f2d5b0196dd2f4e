use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use local_sheet::SheetConfig;
use serde::{Deserialize, Serialize};

/// Names a JSON file holding a [`DemoConfig`].
pub const CONFIG_ENV: &str = "COUNTER_SHEET_CONFIG";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub counter_interval_ms: u64,
    pub frame_interval_ms: u64,
    pub sheet: SheetConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            counter_interval_ms: 1000,
            frame_interval_ms: 16,
            sheet: SheetConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Reads the file named by `COUNTER_SHEET_CONFIG`, or the defaults when
    /// the variable is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn counter_interval(&self) -> Duration {
        Duration::from_millis(self.counter_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
