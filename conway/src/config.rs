// config.rs - Construction parameters for the engine and the frame loop

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::ConfigError;
use crate::render::BYTES_PER_PIXEL;

pub const DEFAULT_WIDTH: usize = 320;
pub const DEFAULT_HEIGHT: usize = 240;
pub const DEFAULT_DENSITY: f64 = 0.25;
pub const DEFAULT_TPS: u32 = 10;

/// Everything needed to build an [`Engine`](crate::Engine) and drive it.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeConfig {
    pub width: usize,
    pub height: usize,
    /// Probability that a cell starts alive.
    pub density: f64,
    pub high_life: bool,
    /// `None` derives a seed from the wall clock.
    pub seed: Option<u64>,
    /// Chance that an otherwise dead, unmatched cell is born. `None` disables it.
    pub spontaneous_birth: Option<f64>,
    pub ticks_per_second: u32,
    /// Oldest generations are dropped once the ledger holds this many. `None` keeps all.
    pub history_limit: Option<usize>,
    /// Evaluate each row on its own tokio task.
    pub row_tasks: bool,
    pub pause_on_cycle: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            density: DEFAULT_DENSITY,
            high_life: false,
            seed: None,
            spontaneous_birth: None,
            ticks_per_second: DEFAULT_TPS,
            history_limit: None,
            row_tasks: false,
            pause_on_cycle: false,
        }
    }
}

impl LifeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.width.checked_mul(self.height).and_then(|cells| cells.checked_mul(BYTES_PER_PIXEL)).is_none() {
            return Err(ConfigError::GridTooLarge { width: self.width, height: self.height });
        }
        if !is_probability(self.density) {
            return Err(ConfigError::DensityOutOfRange(self.density));
        }
        if let Some(p) = self.spontaneous_birth {
            if !is_probability(p) {
                return Err(ConfigError::BirthProbabilityOutOfRange(p));
            }
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTicksPerSecond);
        }
        if let Some(limit) = self.history_limit {
            if limit < 2 {
                return Err(ConfigError::HistoryLimitTooSmall(limit));
            }
        }
        Ok(())
    }

    /// The configured seed, or the current time in microseconds.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_micros() as u64)
                .unwrap_or_default()
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

fn is_probability(p: f64) -> bool {
    p.is_finite() && (0.0..=1.0).contains(&p)
}
