//! Error types for FastRangeMap
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for FastRangeMap operations
#[derive(Debug, Error)]
pub enum RangeMapError {
    /// Almanac parsing errors
    #[error("Almanac parse error: {0}")]
    AlmanacParse(#[from] AlmanacParseError),

    /// Seed interpretation errors
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// Interval mapping errors
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Worker pool could not be built
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while parsing an almanac description
#[derive(Debug, Error)]
pub enum AlmanacParseError {
    /// First line is not `label: <ints>`
    #[error("Missing seed line at line {line}: expected '<label>: <integers>'")]
    MissingSeeds { line: usize },

    /// Category-pair header is not exactly two names joined by `-to-`
    #[error("Invalid map header at line {line}: '{content}'")]
    InvalidHeader { line: usize, content: String },

    /// Translation line is not exactly three integers
    #[error("Invalid translation at line {line}: {message}")]
    InvalidTranslation { line: usize, message: String },

    /// Failed to parse integer
    #[error("Failed to parse integer '{value}' at line {line}")]
    ParseInt { line: usize, value: String },

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlmanacParseError {
    /// Line number (1-based) the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            AlmanacParseError::MissingSeeds { line }
            | AlmanacParseError::InvalidHeader { line, .. }
            | AlmanacParseError::InvalidTranslation { line, .. }
            | AlmanacParseError::ParseInt { line, .. } => Some(*line),
            AlmanacParseError::Io(_) => None,
        }
    }
}

/// Errors that can occur while turning seed values into intervals
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    /// A `(start, length)` pair whose last value does not fit in `i64`
    #[error("Seed range start {start} length {length} overflows i64")]
    RangeOverflow { start: i64, length: i64 },
}

/// Errors that can occur during interval mapping
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// The mapped interval set is empty, so it has no minimum
    #[error("No minimum defined: the mapped interval set is empty")]
    EmptyIntervalSet,
}

/// Result type alias for FastRangeMap operations
pub type Result<T> = std::result::Result<T, RangeMapError>;

/// Result type alias for almanac parsing operations
pub type AlmanacResult<T> = std::result::Result<T, AlmanacParseError>;

/// Result type alias for seed interpretation
pub type SeedResult<T> = std::result::Result<T, SeedError>;

/// Result type alias for mapping operations
pub type MappingResult<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_line() {
        let err = AlmanacParseError::ParseInt { line: 4, value: "x1".to_string() };
        assert_eq!(err.line(), Some(4));
        assert_eq!(err.to_string(), "Failed to parse integer 'x1' at line 4");

        let io = AlmanacParseError::from(std::io::Error::other("boom"));
        assert_eq!(io.line(), None);
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: RangeMapError = MappingError::EmptyIntervalSet.into();
        assert!(matches!(err, RangeMapError::Mapping(MappingError::EmptyIntervalSet)));
        assert!(err.to_string().contains("No minimum defined"));
    }

    #[test]
    fn test_seed_error_conversion() {
        let err: RangeMapError = SeedError::RangeOverflow { start: i64::MAX, length: 2 }.into();
        assert!(matches!(err, RangeMapError::Seed(SeedError::RangeOverflow { length: 2, .. })));
        assert!(err.to_string().contains("overflows i64"));
    }
}
