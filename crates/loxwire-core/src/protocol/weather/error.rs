use thiserror::Error;

use crate::protocol::common::CursorError;

/// Errors that abort a weather payload decode.
///
/// Indices are zero-based positions in payload order.
///
/// # Examples
/// ```
/// use loxwire_core::{CursorError, WeatherError};
///
/// let err = WeatherError::TruncatedEntry {
///     table: 0,
///     entry: 1,
///     source: CursorError::TooShort { needed: 4, actual: 0 },
/// };
/// assert!(err.to_string().contains("entry 1 truncated"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("weather table {table} truncated: {source}")]
    TruncatedTable {
        table: usize,
        #[source]
        source: CursorError,
    },
    #[error("weather table {table} entry {entry} truncated: {source}")]
    TruncatedEntry {
        table: usize,
        entry: usize,
        #[source]
        source: CursorError,
    },
}
