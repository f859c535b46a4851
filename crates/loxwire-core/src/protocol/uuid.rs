//! Canonical text form of the controller's 16-byte identifiers.
//!
//! The first three groups (4, 2 and 2 bytes) are little-endian words on the
//! wire and are printed big-endian; the trailing 8 bytes are printed in wire
//! order. The result is always 36 lowercase characters, `8-4-4-4-12`.

use thiserror::Error;

pub const UUID_LEN: usize = 16;
pub const UUID_TEXT_LEN: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UuidError {
    #[error("invalid uuid length: need 16 bytes, got {actual}")]
    InvalidLength { actual: usize },
}

/// Render 16 raw identifier bytes in canonical hyphenated form.
///
/// # Examples
/// ```
/// use loxwire_core::format_uuid;
///
/// let raw = [
///     0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
///     0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
/// ];
/// assert_eq!(format_uuid(&raw), "33221100-5544-7766-8899-aabbccddeeff");
/// ```
pub fn format_uuid(bytes: &[u8; UUID_LEN]) -> String {
    ::uuid::Uuid::from_bytes_le(*bytes)
        .hyphenated()
        .to_string()
}

/// Slice variant of [`format_uuid`]; anything but 16 bytes is rejected.
///
/// # Examples
/// ```
/// use loxwire_core::{UuidError, try_format_uuid};
///
/// let err = try_format_uuid(&[0u8; 15]).unwrap_err();
/// assert_eq!(err, UuidError::InvalidLength { actual: 15 });
/// ```
pub fn try_format_uuid(bytes: &[u8]) -> Result<String, UuidError> {
    let raw: &[u8; UUID_LEN] = bytes.try_into().map_err(|_| UuidError::InvalidLength {
        actual: bytes.len(),
    })?;
    Ok(format_uuid(raw))
}
