use serde::{Deserialize, Serialize};

use crate::protocol::event::{BinaryEvent, PayloadStatus, inspect_binary_event};
use crate::protocol::header::{EventType, Header};
use crate::protocol::weather::{WeatherError, WeatherEventTable, try_decode_weather_tables};

/// Decoded payload, shaped by the header's event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum Message {
    Events(BinaryEvent),
    Weather(Vec<WeatherEventTable>),
}

impl Message {
    pub fn event_count(&self) -> usize {
        match self {
            Message::Events(event) => event.events().len(),
            Message::Weather(tables) => tables.iter().map(|table| table.entries.len()).sum(),
        }
    }
}

/// Something worth reporting about a payload that still decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageIssue {
    TrailingBytes { count: usize },
    WeatherMalformed(WeatherError),
    UnsupportedType(EventType),
    UnknownType(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub message: Message,
    pub issue: Option<MessageIssue>,
}

/// Decode a payload according to its header.
///
/// Weather payloads go to the weather table decoder, everything else to the
/// event decoder. The payload is used as given; pairing it with the header
/// is the caller's job.
///
/// # Examples
/// ```
/// use loxwire_core::{Message, decode_header, decode_message};
///
/// let header = decode_header(&[0x03, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00])?;
/// assert_eq!(decode_message(&header, &[]), Message::Weather(Vec::new()));
/// # Ok::<(), loxwire_core::HeaderError>(())
/// ```
pub fn decode_message(header: &Header, payload: &[u8]) -> Message {
    inspect_message(header, payload).message
}

/// Like [`decode_message`], also describing anything dropped or skipped.
pub fn inspect_message(header: &Header, payload: &[u8]) -> Inspection {
    if header.event_type == EventType::Weather {
        return match try_decode_weather_tables(payload) {
            Ok(tables) => Inspection {
                message: Message::Weather(tables),
                issue: None,
            },
            Err(err) => {
                log::warn!("discarding weather payload of {} bytes: {err}", payload.len());
                Inspection {
                    message: Message::Weather(Vec::new()),
                    issue: Some(MessageIssue::WeatherMalformed(err)),
                }
            }
        };
    }

    let decoded = inspect_binary_event(payload, header.event_type);
    let issue = match decoded.event.status() {
        PayloadStatus::Unsupported => Some(MessageIssue::UnsupportedType(header.event_type)),
        PayloadStatus::Unknown => Some(MessageIssue::UnknownType(header.event_type.code())),
        PayloadStatus::Decoded if decoded.discarded > 0 => Some(MessageIssue::TrailingBytes {
            count: decoded.discarded,
        }),
        PayloadStatus::Decoded => None,
    };
    Inspection {
        message: Message::Events(decoded.event),
        issue,
    }
}

#[cfg(test)]
mod tests {
    use super::{Message, MessageIssue, decode_message, inspect_message};
    use crate::protocol::event::PayloadStatus;
    use crate::protocol::header::{EventType, Header};
    use crate::protocol::weather::WeatherError;

    #[test]
    fn value_payload_goes_to_event_decoder() {
        let mut payload = vec![0u8; 16];
        payload.extend_from_slice(&1.0f64.to_le_bytes());
        let header = Header::new(EventType::Event, payload.len() as u32, false);

        let inspection = inspect_message(&header, &payload);
        assert!(inspection.issue.is_none());
        assert_eq!(inspection.message.event_count(), 1);
    }

    #[test]
    fn trailing_bytes_are_reported() {
        let payload = vec![0u8; 30];
        let header = Header::new(EventType::Event, 30, false);
        let inspection = inspect_message(&header, &payload);
        assert_eq!(inspection.issue, Some(MessageIssue::TrailingBytes { count: 6 }));
    }

    #[test]
    fn weather_failure_is_reported_with_empty_tables() {
        let mut payload = vec![0u8; 16];
        payload.extend_from_slice(&1i32.to_le_bytes());
        payload.extend_from_slice(&0u32.to_le_bytes());
        let header = Header::new(EventType::Weather, payload.len() as u32, false);

        let inspection = inspect_message(&header, &payload);
        assert_eq!(inspection.message, Message::Weather(Vec::new()));
        assert!(matches!(
            inspection.issue,
            Some(MessageIssue::WeatherMalformed(WeatherError::TruncatedEntry { .. }))
        ));
    }

    #[test]
    fn unsupported_and_unknown_types_are_flagged() {
        let header = Header::new(EventType::Daytimer, 4, false);
        let inspection = inspect_message(&header, &[0u8; 4]);
        assert_eq!(
            inspection.issue,
            Some(MessageIssue::UnsupportedType(EventType::Daytimer))
        );

        let header = Header::new(EventType::Unknown(99), 0, false);
        match decode_message(&header, &[]) {
            Message::Events(event) => assert_eq!(event.status(), PayloadStatus::Unknown),
            other => panic!("expected events, got {other:?}"),
        }
        assert_eq!(
            inspect_message(&header, &[]).issue,
            Some(MessageIssue::UnknownType(99))
        );
    }

    #[test]
    fn empty_payload_yields_empty_result_for_every_type() {
        for code in 0u8..=8 {
            let header = Header::new(EventType::from(code), 0, false);
            assert_eq!(decode_message(&header, &[]).event_count(), 0);
        }
    }
}
