use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the fuel-stop planning library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A polyline contained a byte outside the printable encoding range.
    #[error("invalid polyline character {character:?} at offset {offset}")]
    PolylineInvalidCharacter { offset: usize, character: char },

    /// A polyline value ended before its terminating chunk.
    #[error("polyline truncated: unterminated value starting at offset {offset}")]
    PolylineTruncated { offset: usize },

    /// A polyline ended after a latitude delta with no longitude delta.
    #[error("polyline has a latitude without a longitude at offset {offset}")]
    PolylineMissingLongitude { offset: usize },

    /// A polyline value did not fit into 32 bits.
    #[error("polyline value starting at offset {offset} overflows 32 bits")]
    PolylineOverflow { offset: usize },

    /// Raised when a route is built from zero points.
    #[error("route must contain at least one point")]
    EmptyRoute,

    /// Raised when a numeric planning input is out of range.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Raised when a station catalog row fails validation.
    #[error("invalid station catalog: {message}")]
    CatalogValidation { message: String },

    /// Raised when a configured SQLite table name is not a plain identifier.
    #[error("invalid station table name: {name}")]
    InvalidTableName { name: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the station catalog")]
    ProjectDirsUnavailable,

    /// Raised when a catalog cache has never loaded successfully.
    #[error("station catalog unavailable from {source_name}: {message}")]
    CatalogUnavailable {
        source_name: String,
        message: String,
    },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Raised when a catalog file could not be opened.
    #[error("failed to open station catalog at {path}: {source}")]
    CatalogOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this error originates from decoding an encoded polyline.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::PolylineInvalidCharacter { .. }
                | Error::PolylineTruncated { .. }
                | Error::PolylineMissingLongitude { .. }
                | Error::PolylineOverflow { .. }
                | Error::EmptyRoute
        )
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_classified() {
        assert!(Error::PolylineTruncated { offset: 3 }.is_decode_error());
        assert!(Error::EmptyRoute.is_decode_error());
        assert!(!Error::invalid_input("mpg").is_decode_error());
    }

    #[test]
    fn invalid_input_message_is_rendered() {
        let err = Error::invalid_input("vehicle_mpg must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid input: vehicle_mpg must be positive, got 0"
        );
    }
}
