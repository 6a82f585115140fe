use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::kitchen::JoinStrategy;
use crate::{mlog_debug, Error, Result};

pub const DEFAULT_TIME_UNIT_MS: u64 = 1000;
pub const DEFAULT_BOIL_UNITS: u32 = 2;
pub const DEFAULT_CHOP_UNITS: u32 = 1;
pub const DEFAULT_SETTLE_UNITS: u32 = 3;

/// Kitchen timings, read from `~/.mealprep/mealprep.toml`.
///
/// Every field is optional in the file. `settle_units` is both the
/// fixed-sleep wait and the join timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub time_unit_ms: u64,
    pub join: JoinStrategy,
    pub boil_units: u32,
    pub chop_units: u32,
    pub settle_units: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_unit_ms: DEFAULT_TIME_UNIT_MS,
            join: JoinStrategy::default(),
            boil_units: DEFAULT_BOIL_UNITS,
            chop_units: DEFAULT_CHOP_UNITS,
            settle_units: DEFAULT_SETTLE_UNITS,
        }
    }
}

impl Config {
    pub fn mealprep_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".mealprep"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::mealprep_dir()?.join("mealprep.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        mlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            mlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        mlog_debug!(
            "Config loaded: unit={}ms join={} boil={} chop={} settle={}",
            config.time_unit_ms,
            config.join,
            config.boil_units,
            config.chop_units,
            config.settle_units
        );
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                mlog_debug!("Creating config directory: {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        mlog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_unit_ms == 0 {
            return Err(Error::Validation("time_unit_ms must be positive".to_string()));
        }
        if self.settle_units == 0 {
            return Err(Error::Validation("settle_units must be positive".to_string()));
        }
        for (field, n) in [
            ("boil_units", self.boil_units),
            ("chop_units", self.chop_units),
            ("settle_units", self.settle_units),
        ] {
            if self.time_unit().checked_mul(n).is_none() {
                return Err(Error::Validation(format!(
                    "{} x time_unit_ms overflows a duration",
                    field
                )));
            }
        }
        Ok(())
    }

    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }

    /// Panics on overflow; `validate` rules that out for the configured units.
    pub fn units(&self, n: u32) -> Duration {
        self.time_unit() * n
    }

    pub fn boil_duration(&self) -> Duration {
        self.units(self.boil_units)
    }

    pub fn chop_duration(&self) -> Duration {
        self.units(self.chop_units)
    }

    pub fn settle_duration(&self) -> Duration {
        self.units(self.settle_units)
    }
}
