use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    ffi::OsString,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    errors::{BudgetError, Result},
    plan::DAILY_BUDGET_FACTOR,
    utils::paths::{app_data_dir, config_file_in, ensure_dir},
};

const STAGING_SUFFIX: &str = "tmp";
/// Limits up to `MAX_CEILING x MAX_DAILY_FACTOR` still fit in minor units at this precision.
pub const MAX_COST_PRECISION: u32 = 10;
pub const MAX_DAILY_FACTOR: i64 = 1_000;

/// Tunables for plan building and cost simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub daily_budget_factor: Decimal,
    pub max_costs_per_day: u32,
    pub cost_precision: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            daily_budget_factor: DAILY_BUDGET_FACTOR,
            max_costs_per_day: 9,
            cost_precision: 2,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.daily_budget_factor.is_sign_negative() && !self.daily_budget_factor.is_zero() {
            return Err(BudgetError::Config(format!(
                "daily budget factor must not be negative, got {}",
                self.daily_budget_factor
            )));
        }
        if self.daily_budget_factor > Decimal::from(MAX_DAILY_FACTOR) {
            return Err(BudgetError::Config(format!(
                "daily budget factor must be at most {}, got {}",
                MAX_DAILY_FACTOR, self.daily_budget_factor
            )));
        }
        if self.cost_precision > MAX_COST_PRECISION {
            return Err(BudgetError::Config(format!(
                "cost precision must be at most {}, got {}",
                MAX_COST_PRECISION, self.cost_precision
            )));
        }
        Ok(())
    }
}

/// Loads and stores [`SimulationConfig`] as JSON under the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    /// Falls back to defaults when no file exists yet.
    pub fn load(&self) -> Result<SimulationConfig> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| BudgetError::Config(err.to_string()))?
        } else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            SimulationConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &SimulationConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        replace_file(&self.path, &json)?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes `data` to a staging file beside `path`, then renames it over `path`.
fn replace_file(path: &Path, data: &str) -> Result<()> {
    let staged = staging_path(path);
    let mut file = File::create(&staged)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    fs::rename(&staged, path)?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}
