use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::protocol::header::decode_header;
use crate::source::{Frame, MessageSource, SourceError};

use super::layout;
use super::reader::read_until_full;

/// Message source over any byte stream carrying header/payload pairs.
///
/// Each header is followed by exactly `length` payload bytes. The estimated
/// flag is passed through on the header and not reinterpreted.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use loxwire_core::{EventType, MessageSource, StreamSource};
///
/// let bytes = [0x03, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
/// let mut source = StreamSource::new(Cursor::new(bytes));
/// let frame = source.next_message()?.expect("one frame");
/// assert_eq!(frame.header.event_type, EventType::Event);
/// assert!(frame.payload.is_empty());
/// assert!(source.next_message()?.is_none());
/// # Ok::<(), loxwire_core::SourceError>(())
/// ```
pub struct StreamSource<R> {
    inner: R,
    max_payload_len: usize,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            max_payload_len: layout::DEFAULT_MAX_PAYLOAD_LEN,
        }
    }

    /// Reject headers announcing more than `max` payload bytes.
    pub fn with_max_payload_len(mut self, max: usize) -> Self {
        self.max_payload_len = max;
        self
    }

    pub fn max_payload_len(&self) -> usize {
        self.max_payload_len
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl StreamSource<BufReader<File>> {
    /// Open a recorded capture file.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::with_capacity(
            layout::READ_BUFFER_SIZE,
            file,
        )))
    }
}

impl<R: Read> MessageSource for StreamSource<R> {
    fn next_message(&mut self) -> Result<Option<Frame>, SourceError> {
        let mut raw = [0u8; layout::HEADER_LEN];
        let read = read_until_full(&mut self.inner, &mut raw)?;
        if read == 0 {
            return Ok(None);
        }
        if read < layout::HEADER_LEN {
            return Err(SourceError::TruncatedHeader { actual: read });
        }
        let header = decode_header(&raw)?;

        let expected = usize::try_from(header.length)
            .ok()
            .filter(|len| *len <= self.max_payload_len)
            .ok_or(SourceError::PayloadTooLarge {
                length: header.length,
                max: self.max_payload_len,
            })?;
        let mut payload = vec![0u8; expected];
        let actual = read_until_full(&mut self.inner, &mut payload)?;
        if actual < expected {
            return Err(SourceError::TruncatedPayload { expected, actual });
        }

        Ok(Some(Frame { header, payload }))
    }
}
