use thiserror::Error;

/// Errors returned by header decoding.
///
/// # Examples
/// ```
/// use loxwire_core::HeaderError;
///
/// let err = HeaderError::InvalidHeaderLength { actual: 3 };
/// assert!(err.to_string().contains("invalid header length"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("invalid header length: need 8 bytes, got {actual}")]
    InvalidHeaderLength { actual: usize },
}
