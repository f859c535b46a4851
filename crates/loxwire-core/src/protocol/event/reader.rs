use crate::protocol::common::ByteCursor;
use crate::protocol::uuid::format_uuid;

use super::layout;
use super::parser::{TextEvent, ValueEvent};

/// Padding that follows a text of `len` bytes on the wire.
///
/// # Examples
/// ```text
/// use loxwire_core::protocol::event::reader::text_padding;
///
/// assert_eq!(text_padding(5), 3);
/// assert_eq!(text_padding(8), 0);
/// ```
pub fn text_padding(len: usize) -> usize {
    (layout::TEXT_ALIGNMENT - len % layout::TEXT_ALIGNMENT) % layout::TEXT_ALIGNMENT
}

/// Sequential record reader for value and text event payloads.
///
/// Both record readers return `None` once the next record is not fully
/// present; nothing is consumed in that case, so `remaining` reports the
/// discarded tail.
pub struct EventReader<'a> {
    cursor: ByteCursor<'a>,
}

impl<'a> EventReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(payload),
        }
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn next_value(&mut self) -> Option<ValueEvent> {
        let mut cursor = self.cursor;
        cursor.require(layout::VALUE_RECORD_LEN).ok()?;
        let uuid = cursor.read_array().ok()?;
        let value = cursor.read_f64_le().ok()?;
        self.cursor = cursor;
        Some(ValueEvent {
            uuid: format_uuid(&uuid),
            value,
        })
    }

    /// Read one text record; trailing padding is consumed as far as present.
    pub fn next_text(&mut self) -> Option<TextEvent> {
        let mut cursor = self.cursor;
        cursor.require(layout::TEXT_PREFIX_LEN).ok()?;
        let uuid = cursor.read_array().ok()?;
        let icon_uuid = cursor.read_array().ok()?;
        let len = usize::try_from(cursor.read_u32_le().ok()?).ok()?;
        let text = cursor.read_bytes(len).ok()?;
        cursor.skip_up_to(text_padding(len));
        self.cursor = cursor;
        Some(TextEvent {
            uuid: format_uuid(&uuid),
            icon_uuid: format_uuid(&icon_uuid),
            text: text.to_vec(),
        })
    }
}
