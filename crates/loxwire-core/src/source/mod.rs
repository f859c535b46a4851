mod stream;

pub use stream::StreamSource;
pub use stream::layout::DEFAULT_MAX_PAYLOAD_LEN;

use thiserror::Error;

use crate::protocol::header::{Header, HeaderError};

/// One header together with the payload it announced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: Header,
    pub payload: Vec<u8>,
}

/// Anything that yields header/payload pairs in stream order.
///
/// `Ok(None)` marks a clean end of stream.
pub trait MessageSource {
    fn next_message(&mut self) -> Result<Option<Frame>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("header error: {0}")]
    Header(#[from] HeaderError),
    #[error("stream ended inside a header: got {actual} of 8 bytes")]
    TruncatedHeader { actual: usize },
    #[error("stream ended inside a payload: expected {expected} bytes, got {actual}")]
    TruncatedPayload { expected: usize, actual: usize },
    #[error("payload of {length} bytes exceeds the {max} byte limit")]
    PayloadTooLarge { length: u32, max: usize },
}
