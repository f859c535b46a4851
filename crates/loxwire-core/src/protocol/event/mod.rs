//! Value and text event decoding.
//!
//! Value events are fixed 24-byte records (uuid + little-endian `f64`). Text
//! events carry two uuids, a `u32` text length and the text itself, padded to
//! a 4-byte boundary. Both decoders are lenient: they stop at the last
//! complete record and never fail.
//!
//! Other known types (day timers, files, keepalives, ...) have no record
//! decoder and are returned as explicitly unsupported payloads.

pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{
    BinaryEvent, Event, EventDecode, PayloadStatus, TextEvent, ValueEvent, decode_binary_event,
    inspect_binary_event,
};
