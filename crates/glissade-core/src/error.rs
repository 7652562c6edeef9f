use thiserror::Error;

/// Construction-time configuration failures. Nothing past construction can
/// fail: every update path is a total function of the recorded state.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("cell width must be finite and positive, got {0}")]
    InvalidCellWidth(f64),
    #[error("at least 3 live elements are required for the window, got {0}")]
    TooFewElements(usize),
    #[error("huge range multiplier must be non-zero")]
    ZeroRangeMultiplier,
}
