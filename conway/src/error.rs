// error.rs - Construction failures

use thiserror::Error;

/// Rejected construction parameters. Nothing is built when one of these comes back.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid width must be at least 1")]
    ZeroWidth,
    #[error("grid height must be at least 1")]
    ZeroHeight,
    #[error("a {width}x{height} grid does not fit in memory")]
    GridTooLarge { width: usize, height: usize },
    #[error("density {0} must be between 0.0 and 1.0")]
    DensityOutOfRange(f64),
    #[error("spontaneous birth probability {0} must be between 0.0 and 1.0")]
    BirthProbabilityOutOfRange(f64),
    #[error("ticks per second must be at least 1")]
    ZeroTicksPerSecond,
    #[error("history limit {0} must keep at least 2 generations")]
    HistoryLimitTooSmall(usize),
    #[error("row task runtime failed to start: {0}")]
    Runtime(#[from] std::io::Error),
}
