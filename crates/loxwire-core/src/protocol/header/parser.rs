use serde::{Deserialize, Serialize};

use super::error::HeaderError;
use super::layout;

/// Message type carried in header byte 1.
///
/// Codes outside the known range stay representable as `Unknown`. A
/// deserialized `unknown` code that names a known type is normalized to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "EventTypeRepr")]
pub enum EventType {
    Text,
    File,
    Event,
    EventText,
    Daytimer,
    OutOfService,
    Keepalive,
    Weather,
    Unknown(u8),
}

impl EventType {
    pub fn code(self) -> u8 {
        match self {
            EventType::Text => layout::TYPE_TEXT,
            EventType::File => layout::TYPE_FILE,
            EventType::Event => layout::TYPE_EVENT,
            EventType::EventText => layout::TYPE_EVENT_TEXT,
            EventType::Daytimer => layout::TYPE_DAYTIMER,
            EventType::OutOfService => layout::TYPE_OUT_OF_SERVICE,
            EventType::Keepalive => layout::TYPE_KEEPALIVE,
            EventType::Weather => layout::TYPE_WEATHER,
            EventType::Unknown(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EventType::Text => "text",
            EventType::File => "file",
            EventType::Event => "event",
            EventType::EventText => "event_text",
            EventType::Daytimer => "daytimer",
            EventType::OutOfService => "out_of_service",
            EventType::Keepalive => "keepalive",
            EventType::Weather => "weather",
            EventType::Unknown(_) => "unknown",
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, EventType::Unknown(_))
    }
}

impl From<u8> for EventType {
    fn from(code: u8) -> Self {
        match code {
            layout::TYPE_TEXT => EventType::Text,
            layout::TYPE_FILE => EventType::File,
            layout::TYPE_EVENT => EventType::Event,
            layout::TYPE_EVENT_TEXT => EventType::EventText,
            layout::TYPE_DAYTIMER => EventType::Daytimer,
            layout::TYPE_OUT_OF_SERVICE => EventType::OutOfService,
            layout::TYPE_KEEPALIVE => EventType::Keepalive,
            layout::TYPE_WEATHER => EventType::Weather,
            other => EventType::Unknown(other),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum EventTypeRepr {
    Text,
    File,
    Event,
    EventText,
    Daytimer,
    OutOfService,
    Keepalive,
    Weather,
    Unknown(u8),
}

impl From<EventTypeRepr> for EventType {
    fn from(repr: EventTypeRepr) -> Self {
        match repr {
            EventTypeRepr::Text => EventType::Text,
            EventTypeRepr::File => EventType::File,
            EventTypeRepr::Event => EventType::Event,
            EventTypeRepr::EventText => EventType::EventText,
            EventTypeRepr::Daytimer => EventType::Daytimer,
            EventTypeRepr::OutOfService => EventType::OutOfService,
            EventTypeRepr::Keepalive => EventType::Keepalive,
            EventTypeRepr::Weather => EventType::Weather,
            EventTypeRepr::Unknown(code) => EventType::from(code),
        }
    }
}

impl From<EventType> for u8 {
    fn from(value: EventType) -> Self {
        value.code()
    }
}

/// Decoded 8-byte message header.
///
/// `empty` marks the end-of-stream sentinel and is never set by
/// [`decode_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub event_type: EventType,
    /// Payload byte count, or a sub-message count when `estimated` is set.
    pub length: u32,
    pub estimated: bool,
    pub empty: bool,
}

impl Header {
    /// End-of-stream sentinel, distinct from a real header of type `Text`.
    pub const EMPTY: Header = Header {
        event_type: EventType::Text,
        length: 0,
        estimated: false,
        empty: true,
    };

    pub fn new(event_type: EventType, length: u32, estimated: bool) -> Self {
        Self {
            event_type,
            length,
            estimated,
            empty: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }
}

/// Decode a message header.
///
/// Bytes 0 and 3 are reserved and ignored.
///
/// # Examples
/// ```
/// use loxwire_core::{EventType, decode_header};
///
/// let header = decode_header(&[0x00, 0x02, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00])?;
/// assert_eq!(header.event_type, EventType::Event);
/// assert_eq!(header.length, 5);
/// assert!(!header.estimated);
/// # Ok::<(), loxwire_core::HeaderError>(())
/// ```
///
/// # Errors
/// Returns `HeaderError::InvalidHeaderLength` unless `bytes` is exactly 8
/// bytes long.
pub fn decode_header(bytes: &[u8]) -> Result<Header, HeaderError> {
    let raw: &[u8; layout::HEADER_LEN] =
        bytes
            .try_into()
            .map_err(|_| HeaderError::InvalidHeaderLength {
                actual: bytes.len(),
            })?;

    let mut length = [0u8; 4];
    length.copy_from_slice(&raw[layout::LENGTH_RANGE]);
    Ok(Header::new(
        EventType::from(raw[layout::EVENT_TYPE_OFFSET]),
        u32::from_le_bytes(length),
        raw[layout::FLAGS_OFFSET] == layout::ESTIMATED_FLAG,
    ))
}

/// Encode a header into its 8-byte wire form.
///
/// # Examples
/// ```
/// use loxwire_core::{EventType, Header, decode_header, encode_header};
///
/// let header = Header::new(EventType::Weather, 96, false);
/// assert_eq!(decode_header(&encode_header(&header)).unwrap(), header);
/// ```
pub fn encode_header(header: &Header) -> [u8; layout::HEADER_LEN] {
    let mut raw = [0u8; layout::HEADER_LEN];
    raw[layout::MARKER_OFFSET] = layout::BINARY_MARKER;
    raw[layout::EVENT_TYPE_OFFSET] = header.event_type.code();
    if header.estimated {
        raw[layout::FLAGS_OFFSET] = layout::ESTIMATED_FLAG;
    }
    raw[layout::LENGTH_RANGE].copy_from_slice(&header.length.to_le_bytes());
    raw
}

#[cfg(test)]
mod tests {
    use super::{EventType, Header, decode_header, encode_header};
    use crate::protocol::header::error::HeaderError;
    use crate::protocol::header::layout;

    #[test]
    fn decode_value_event_header() {
        let header = decode_header(&[0x00, 0x02, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(header.event_type, EventType::Event);
        assert_eq!(header.length, 5);
        assert!(!header.estimated);
        assert!(!header.is_empty());
    }

    #[test]
    fn decode_estimated_flag() {
        let header = decode_header(&[0x03, 0x07, 0x80, 0x00, 0x02, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(header.event_type, EventType::Weather);
        assert!(header.estimated);
        assert_eq!(header.length, 2);
    }

    #[test]
    fn other_flag_values_are_not_estimated() {
        let header = decode_header(&[0x03, 0x02, 0x81, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();
        assert!(!header.estimated);
    }

    #[test]
    fn length_is_little_endian_u32() {
        let header = decode_header(&[0x03, 0x03, 0x00, 0x00, 0x78, 0x56, 0x34, 0x12]).unwrap();
        assert_eq!(header.length, 0x1234_5678);
    }

    #[test]
    fn reserved_bytes_are_ignored() {
        let a = decode_header(&[0x00, 0x02, 0x00, 0x00, 0x18, 0, 0, 0]).unwrap();
        let b = decode_header(&[0xff, 0x02, 0x00, 0xff, 0x18, 0, 0, 0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_type_code_is_preserved() {
        let header = decode_header(&[0x03, 0x2a, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(header.event_type, EventType::Unknown(0x2a));
        assert_eq!(header.event_type.code(), 0x2a);
        assert!(!header.event_type.is_known());
    }

    #[test]
    fn wrong_lengths_are_rejected() {
        for len in [0usize, 1, 7, 9, 16] {
            let bytes = vec![0u8; len];
            let err = decode_header(&bytes).unwrap_err();
            assert_eq!(err, HeaderError::InvalidHeaderLength { actual: len });
        }
    }

    #[test]
    fn type_codes_map_both_ways() {
        for code in 0u8..=7 {
            let ty = EventType::from(code);
            assert!(ty.is_known());
            assert_eq!(u8::from(ty), code);
        }
        assert_eq!(EventType::from(3), EventType::EventText);
        assert_eq!(EventType::EventText.name(), "event_text");
    }

    #[test]
    fn empty_sentinel_differs_from_text_header() {
        let text = Header::new(EventType::Text, 0, false);
        assert_ne!(text, Header::EMPTY);
        assert!(Header::EMPTY.is_empty());
    }

    #[test]
    fn encode_writes_wire_layout() {
        let raw = encode_header(&Header::new(EventType::EventText, 0x0102, true));
        assert_eq!(raw, [0x03, 0x03, 0x80, 0x00, 0x02, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn length_is_read_from_layout_range() {
        let mut raw = [0u8; layout::HEADER_LEN];
        raw[layout::EVENT_TYPE_OFFSET] = layout::TYPE_EVENT;
        raw[layout::LENGTH_RANGE].copy_from_slice(&0xdead_beefu32.to_le_bytes());
        assert_eq!(decode_header(&raw).unwrap().length, 0xdead_beef);
    }

    #[test]
    fn deserialized_unknown_code_is_normalized() {
        let ty: EventType = serde_json::from_str(r#"{"unknown":2}"#).unwrap();
        assert_eq!(ty, EventType::Event);
        let ty: EventType = serde_json::from_str(r#"{"unknown":42}"#).unwrap();
        assert_eq!(ty, EventType::Unknown(42));
        let ty: EventType = serde_json::from_str(r#""event_text""#).unwrap();
        assert_eq!(ty, EventType::EventText);
        assert_eq!(serde_json::to_string(&EventType::Weather).unwrap(), r#""weather""#);
    }
}
