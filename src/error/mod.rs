//! Error handling for the survey report pipeline.

pub mod util;

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised while loading, recoding, aggregating or writing survey data
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// A required field could not be parsed
    #[error("Malformed record at row {row}: field `{field}` has unusable value {value:?}")]
    MalformedRecord {
        /// Zero-based row index in the input
        row: usize,
        /// Column name of the offending field
        field: &'static str,
        /// Raw value as read from the input
        value: Option<String>,
    },

    /// A weighted mean was required but the group had no eligible weight
    #[error("Weighted mean `{statistic}` has no eligible records")]
    EmptyGroup {
        /// Name of the statistic that came up empty
        statistic: String,
    },

    /// Deflator lookup outside the table's year coverage
    #[error("Year {year} is outside the deflator table coverage ({first}-{last})")]
    OutOfRange {
        /// Requested year
        year: i32,
        /// First year covered by the table
        first: i32,
        /// Last year covered by the table
        last: i32,
    },

    /// Input file does not have the expected columns
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Reshape requested a series the wide table does not carry
    #[error("Unknown series: {0}")]
    UnknownSeries(String),

    /// Invalid configuration or constants file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error converting between rows and Arrow batches or JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SurveyError {
    /// Create a schema mismatch error from any displayable message
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch(message.into())
    }

    /// Create a serialization error from an underlying error
    pub fn serialization<E: std::fmt::Display>(context: &str, error: E) -> Self {
        Self::Serialization(format!("{context}: {error}"))
    }

    /// Whether this error indicates a structural problem that must abort the run
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::MalformedRecord { .. } | Self::EmptyGroup { .. })
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization("JSON", error)
    }
}

impl From<serde_arrow::Error> for SurveyError {
    fn from(error: serde_arrow::Error) -> Self {
        Self::serialization("Arrow rows", error)
    }
}

/// Result type for survey pipeline operations
pub type Result<T> = std::result::Result<T, SurveyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let malformed = SurveyError::MalformedRecord {
            row: 3,
            field: "age",
            value: Some("abc".to_string()),
        };
        assert!(!malformed.is_fatal());
        assert!(
            !SurveyError::EmptyGroup {
                statistic: "wage_f".to_string()
            }
            .is_fatal()
        );
        assert!(
            SurveyError::OutOfRange {
                year: 2016,
                first: 1976,
                last: 2015
            }
            .is_fatal()
        );
        assert!(SurveyError::schema_mismatch("missing `wtsupp`").is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = SurveyError::OutOfRange {
            year: 1970,
            first: 1976,
            last: 2015,
        };
        assert_eq!(
            err.to_string(),
            "Year 1970 is outside the deflator table coverage (1976-2015)"
        );

        let err = SurveyError::MalformedRecord {
            row: 0,
            field: "age",
            value: None,
        };
        assert!(err.to_string().contains("`age`"));
    }
}
