use thiserror::Error;

/// Rejection of a maze configuration before any generation work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A maze dimension is outside `[min, max]`.
    #[error("maze {axis} {value} is out of range ({min}..={max})")]
    SizeOutOfRange {
        axis: &'static str,
        value: u32,
        min: u16,
        max: u16,
    },

    #[error("unknown generation algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// A probability-like tuning parameter is outside `[0.0, 1.0]` (or NaN).
    #[error("{name} must be within 0.0..=1.0, got {value}")]
    ParameterOutOfRange { name: &'static str, value: f32 },

    #[error("room radius bounds are invalid: min {min}, max {max}")]
    InvalidRoomRadius { min: u16, max: u16 },

    #[error("grid has no rows")]
    EmptyGrid,

    /// Every row of an imported grid must have the same length.
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    InvalidGridChar { row: usize, col: usize, ch: char },

    /// The configuration file could not be read or parsed.
    #[error("could not load configuration: {0}")]
    ConfigFile(String),
}

/// Failure of the command-line front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal output failed: {0}")]
    Io(#[from] std::io::Error),
}
