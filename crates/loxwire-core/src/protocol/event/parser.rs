use std::borrow::Cow;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::protocol::header::EventType;

use super::reader::EventReader;

/// State change of a control: new numeric value for `uuid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueEvent {
    pub uuid: String,
    pub value: f64,
}

/// Text state of a control, with the icon it should be displayed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEvent {
    pub uuid: String,
    pub icon_uuid: String,
    /// The declared text bytes, padding excluded. Serialized as a string when
    /// valid UTF-8, as a byte array otherwise.
    #[serde(with = "text_bytes")]
    pub text: Vec<u8>,
}

impl TextEvent {
    /// Text as UTF-8, invalid sequences replaced with U+FFFD.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }
}

mod text_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        match std::str::from_utf8(bytes) {
            Ok(text) => serializer.serialize_str(text),
            Err(_) => serializer.serialize_bytes(bytes),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Bytes(Vec<u8>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text.into_bytes(),
            Repr::Bytes(bytes) => bytes,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Value(ValueEvent),
    Text(TextEvent),
}

impl Event {
    pub fn uuid(&self) -> &str {
        match self {
            Event::Value(event) => &event.uuid,
            Event::Text(event) => &event.uuid,
        }
    }
}

/// How a payload was handled by the event decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadStatus {
    /// Records were decoded (possibly zero of them).
    Decoded,
    /// Known type without a record decoder; raw bytes kept in `data`.
    Unsupported,
    /// Unrecognized type code; raw bytes kept in `data`.
    Unknown,
}

/// Decoded event payload.
///
/// # Examples
/// ```
/// use loxwire_core::{EventType, PayloadStatus, decode_binary_event};
///
/// let event = decode_binary_event(&[], EventType::Event);
/// assert_eq!(event.status(), PayloadStatus::Decoded);
/// assert!(event.events().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryEvent {
    event_type: EventType,
    status: PayloadStatus,
    events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    data: Vec<u8>,
}

impl BinaryEvent {
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn status(&self) -> PayloadStatus {
        self.status
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Raw payload of unsupported and unknown types; empty otherwise.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    fn decoded(event_type: EventType, events: Vec<Event>) -> Self {
        Self {
            event_type,
            status: PayloadStatus::Decoded,
            events,
            data: Vec::new(),
        }
    }

    fn opaque(event_type: EventType, status: PayloadStatus, payload: &[u8]) -> Self {
        Self {
            event_type,
            status,
            events: Vec::new(),
            data: payload.to_vec(),
        }
    }
}

/// Result of [`inspect_binary_event`]: the event plus the bytes left over
/// after the last complete record.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDecode {
    pub event: BinaryEvent,
    pub discarded: usize,
}

/// Decode a value or text event payload.
///
/// Decoding is best-effort: it stops at the last complete record and drops
/// the remainder. Types without a record decoder never fail; they come back
/// as `PayloadStatus::Unsupported` or `PayloadStatus::Unknown`.
///
/// # Examples
/// ```
/// use loxwire_core::{Event, EventType, decode_binary_event};
///
/// let mut payload = vec![0u8; 16];
/// payload.extend_from_slice(&21.5f64.to_le_bytes());
/// let decoded = decode_binary_event(&payload, EventType::Event);
/// match &decoded.events()[0] {
///     Event::Value(event) => assert_eq!(event.value, 21.5),
///     other => panic!("unexpected event {other:?}"),
/// }
/// ```
pub fn decode_binary_event(payload: &[u8], event_type: EventType) -> BinaryEvent {
    inspect_binary_event(payload, event_type).event
}

/// Like [`decode_binary_event`], also reporting how many bytes were dropped.
pub fn inspect_binary_event(payload: &[u8], event_type: EventType) -> EventDecode {
    let mut reader = EventReader::new(payload);
    let event = match event_type {
        EventType::Event => {
            let events = std::iter::from_fn(|| reader.next_value())
                .map(Event::Value)
                .collect();
            BinaryEvent::decoded(event_type, events)
        }
        EventType::EventText => {
            let events = std::iter::from_fn(|| reader.next_text())
                .map(Event::Text)
                .collect();
            BinaryEvent::decoded(event_type, events)
        }
        EventType::Unknown(code) => {
            debug!("unknown event type {code}, keeping {} raw bytes", payload.len());
            return EventDecode {
                event: BinaryEvent::opaque(event_type, PayloadStatus::Unknown, payload),
                discarded: 0,
            };
        }
        other => {
            debug!("no record decoder for {} payloads", other.name());
            return EventDecode {
                event: BinaryEvent::opaque(event_type, PayloadStatus::Unsupported, payload),
                discarded: 0,
            };
        }
    };

    let discarded = reader.remaining();
    if discarded > 0 {
        debug!(
            "discarding {discarded} trailing bytes of {} payload",
            event_type.name()
        );
    }
    EventDecode { event, discarded }
}
