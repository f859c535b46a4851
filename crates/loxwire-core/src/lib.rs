//! loxwire core library: decoding of the controller's binary event stream.
//!
//! Messages arrive as an 8-byte header followed by a payload of the announced
//! length. This crate classifies headers and turns payloads into typed
//! records: value events, text events and weather tables. Decoders are pure
//! functions over fully buffered bytes (layout/reader/parser per segment);
//! reading frames from a byte stream lives in `source`, and `capture` turns a
//! recorded stream into a deterministic report.
//!
//! Invariants:
//! - Identifiers render as 36-character lowercase `8-4-4-4-12` text.
//! - Value/text decoding is lenient and stops at the last complete record.
//! - Weather decoding is strict: one short field rejects the whole payload.
//! - Device timestamps are seconds since 2009-01-01T00:00:00Z.
//!
//! # Examples
//! ```
//! use loxwire_core::{Message, decode_header, decode_message};
//!
//! let header = decode_header(&[0x03, 0x02, 0x00, 0x00, 0x18, 0x00, 0x00, 0x00])?;
//! let mut payload = vec![0u8; 16];
//! payload.extend_from_slice(&1.0f64.to_le_bytes());
//! match decode_message(&header, &payload) {
//!     Message::Events(events) => assert_eq!(events.events().len(), 1),
//!     other => panic!("unexpected message {other:?}"),
//! }
//! # Ok::<(), loxwire_core::HeaderError>(())
//! ```

use serde::{Deserialize, Serialize};

mod capture;
mod message;
pub mod protocol;
mod source;

pub use capture::{
    CaptureError, SEVERITY_ERROR, SEVERITY_WARNING, decode_capture_file, decode_source,
    has_errors,
};
pub use message::{Inspection, Message, MessageIssue, decode_message, inspect_message};
pub use protocol::common::CursorError;
pub use protocol::event::{
    BinaryEvent, Event, EventDecode, PayloadStatus, TextEvent, ValueEvent, decode_binary_event,
    inspect_binary_event,
};
pub use protocol::header::{EventType, Header, HeaderError, decode_header, encode_header};
pub use protocol::uuid::{UuidError, format_uuid, try_format_uuid};
pub use protocol::weather::layout::DEVICE_EPOCH_OFFSET;
pub use protocol::weather::{
    WeatherError, WeatherEvent, WeatherEventTable, decode_weather_tables,
    try_decode_weather_tables,
};
pub use source::{
    DEFAULT_MAX_PAYLOAD_LEN, Frame, MessageSource, SourceError, StreamSource,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decoded capture with deterministic ordering.
///
/// # Examples
/// ```
/// use loxwire_core::make_stub_report;
///
/// let report = make_stub_report("capture.lxw", 123);
/// assert_eq!(report.report_version, loxwire_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    pub input: InputInfo,
    pub summary: CaptureSummary,
    /// Messages in stream order.
    pub messages: Vec<MessageRecord>,
    /// Aggregated issues sorted by id.
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Totals over the whole capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSummary {
    pub messages_total: u64,
    /// Value/text events plus weather entries.
    pub events_total: u64,
    pub weather_tables_total: u64,
    /// Message counts per event type, sorted by type code.
    pub per_type: Vec<TypeCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    pub event_type: EventType,
    pub code: u8,
    pub messages: u64,
}

/// One decoded message and the header it arrived with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Zero-based position in the stream.
    pub index: u64,
    pub header: Header,
    pub message: Message,
}

/// Aggregated decoding issue.
///
/// # Examples
/// ```
/// use loxwire_core::Issue;
///
/// let issue = Issue {
///     id: "LX-WEATHER-MALFORMED".to_string(),
///     severity: "error".to_string(),
///     message: "Weather payload rejected".to_string(),
///     count: 1,
///     examples: Vec::new(),
/// };
/// assert_eq!(issue.count, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable identifier (e.g., `LX-EVENT-TRAILING-BYTES`).
    pub id: String,
    /// Severity label (`error` or `warning`).
    pub severity: String,
    pub message: String,
    pub count: u64,
    /// At most three example contexts, formatted as `message #N: detail`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Build a report with base fields filled and empty aggregates.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "loxwire".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: CaptureSummary::default(),
        messages: vec![],
        issues: vec![],
    }
}
