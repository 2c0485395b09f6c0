use thiserror::Error;

/// Errors raised by the Life engine.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum LifeError {
    /// A board needs at least one row and one column
    #[error("invalid board dimensions {rows}x{cols}: both must be at least 1")]
    InvalidDimension { rows: usize, cols: usize },

    /// Randomization probability outside 0.0..=1.0 (or NaN)
    #[error("invalid probability {0}: must be within 0.0..=1.0")]
    InvalidProbability(f64),
}

pub type Result<T> = std::result::Result<T, LifeError>;

impl From<LifeError> for std::io::Error {
    fn from(e: LifeError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    }
}
