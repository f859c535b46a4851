use thiserror::Error;

/// Error returned when a cursor read runs past the end of the payload.
///
/// # Examples
/// ```text
/// use loxwire_core::protocol::common::cursor::CursorError;
///
/// let err = CursorError::TooShort { needed: 8, actual: 3 };
/// assert_eq!(err.to_string(), "payload too short: need 8 bytes, got 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}

/// Forward-only little-endian cursor over a borrowed payload.
///
/// Every read checks the remaining byte count first, so a truncated field
/// surfaces as `CursorError::TooShort` and never as a panic. The cursor is
/// `Copy`: callers can snapshot it, read ahead, and commit only on success.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    payload: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.payload.len().saturating_sub(self.pos)
    }

    pub fn require(&self, needed: usize) -> Result<(), CursorError> {
        let actual = self.remaining();
        if actual < needed {
            return Err(CursorError::TooShort { needed, actual });
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CursorError> {
        self.require(len)?;
        let end = self.pos + len;
        let bytes = self
            .payload
            .get(self.pos..end)
            .ok_or(CursorError::TooShort {
                needed: len,
                actual: self.remaining(),
            })?;
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CursorError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u32_le(&mut self) -> Result<u32, CursorError> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_i32_le(&mut self) -> Result<i32, CursorError> {
        self.read_array().map(i32::from_le_bytes)
    }

    pub fn read_f64_le(&mut self) -> Result<f64, CursorError> {
        self.read_array().map(f64::from_le_bytes)
    }

    /// Skip up to `len` bytes and return how many were actually skipped.
    pub fn skip_up_to(&mut self, len: usize) -> usize {
        let skipped = len.min(self.remaining());
        self.pos += skipped;
        skipped
    }
}
