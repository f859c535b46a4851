pub use crate::protocol::header::layout::HEADER_LEN;

pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Largest payload a stream source will allocate for by default.
pub const DEFAULT_MAX_PAYLOAD_LEN: usize = 16 * 1024 * 1024;
