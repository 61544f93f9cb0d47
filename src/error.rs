use thiserror::Error;

/// Errors raised by the lattice gas library.
///
/// Nothing inside the step loop can fail: a move either does nothing or
/// updates the lattice and the registry together. Errors only surface at
/// construction time, when a statistic is undefined, or when replaying a
/// stored configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcmcError {
    /// Invalid simulation parameters, detected before any step runs
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A derived quantity whose denominator is zero for the current state
    #[error("Undefined statistic: {0}")]
    UndefinedStatistic(&'static str),

    /// Two rods cover the same cell while replaying placements
    #[error("Rods overlap at cell ({x}, {y})")]
    Overlap { x: usize, y: usize },
}

pub type Result<T> = std::result::Result<T, GcmcError>;
