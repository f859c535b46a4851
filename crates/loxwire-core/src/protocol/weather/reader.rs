use time::{Duration, OffsetDateTime};

use crate::protocol::common::{ByteCursor, CursorError};
use crate::protocol::uuid::format_uuid;

use super::layout;
use super::parser::WeatherEvent;

/// Convert controller-epoch seconds to an absolute UTC timestamp.
///
/// Every `i32` and `u32` device timestamp maps to an exact instant; wider
/// inputs saturate at the limits of `OffsetDateTime`.
///
/// # Examples
/// ```text
/// use loxwire_core::protocol::weather::reader::device_time;
///
/// assert_eq!(device_time(0).unix_timestamp(), 1_230_768_000);
/// ```
pub fn device_time(device_seconds: i64) -> OffsetDateTime {
    let seconds = device_seconds.saturating_add(layout::DEVICE_EPOCH_OFFSET);
    OffsetDateTime::UNIX_EPOCH.saturating_add(Duration::seconds(seconds))
}

/// Table header fields as they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    pub uuid: String,
    pub entry_count: i32,
    pub last_updated: u32,
}

/// One weather entry before timestamp conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub timestamp: i32,
    pub weather_type: i32,
    pub wind_direction: i32,
    pub solar_radiation: i32,
    pub relative_humidity: i32,
    pub temperature: f64,
    pub perceived_temperature: f64,
    pub dew_point: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    pub barometric_pressure: f64,
}

impl RawEntry {
    pub fn into_event(self) -> WeatherEvent {
        WeatherEvent {
            timestamp: device_time(i64::from(self.timestamp)),
            weather_type: self.weather_type,
            wind_direction: self.wind_direction,
            solar_radiation: self.solar_radiation,
            relative_humidity: self.relative_humidity,
            temperature: self.temperature,
            perceived_temperature: self.perceived_temperature,
            dew_point: self.dew_point,
            precipitation: self.precipitation,
            wind_speed: self.wind_speed,
            barometric_pressure: self.barometric_pressure,
        }
    }
}

/// Field-by-field reader for weather payloads.
///
/// Unlike the event reader, every field read is fallible and a short field is
/// reported to the caller rather than skipped.
pub struct WeatherReader<'a> {
    cursor: ByteCursor<'a>,
}

impl<'a> WeatherReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(payload),
        }
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn has_table(&self) -> bool {
        self.remaining() >= layout::TABLE_HEADER_LEN
    }

    pub fn read_table_header(&mut self) -> Result<TableHeader, CursorError> {
        let uuid = self.cursor.read_array()?;
        // Count before last-updated; some controller clients read them swapped.
        let entry_count = self.cursor.read_i32_le()?;
        let last_updated = self.cursor.read_u32_le()?;
        Ok(TableHeader {
            uuid: format_uuid(&uuid),
            entry_count,
            last_updated,
        })
    }

    pub fn read_entry(&mut self) -> Result<RawEntry, CursorError> {
        Ok(RawEntry {
            timestamp: self.cursor.read_i32_le()?,
            weather_type: self.cursor.read_i32_le()?,
            wind_direction: self.cursor.read_i32_le()?,
            solar_radiation: self.cursor.read_i32_le()?,
            relative_humidity: self.cursor.read_i32_le()?,
            temperature: self.cursor.read_f64_le()?,
            perceived_temperature: self.cursor.read_f64_le()?,
            dew_point: self.cursor.read_f64_le()?,
            precipitation: self.cursor.read_f64_le()?,
            wind_speed: self.cursor.read_f64_le()?,
            barometric_pressure: self.cursor.read_f64_le()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use super::{WeatherReader, device_time};
    use crate::protocol::common::CursorError;
    use crate::protocol::weather::layout;

    #[test]
    fn device_epoch_zero_is_2009() {
        let ts = device_time(0);
        assert_eq!(ts.unix_timestamp(), 1_230_768_000);
        assert_eq!(ts.year(), 2009);
        assert_eq!(u8::from(ts.month()), 1);
        assert_eq!(ts.day(), 1);
    }

    #[test]
    fn negative_device_seconds_precede_epoch() {
        let ts = device_time(-1);
        assert_eq!(ts.unix_timestamp(), layout::DEVICE_EPOCH_OFFSET - 1);
    }

    #[test]
    fn u32_range_does_not_overflow() {
        let ts = device_time(i64::from(u32::MAX));
        assert_eq!(
            ts.unix_timestamp(),
            i64::from(u32::MAX) + layout::DEVICE_EPOCH_OFFSET
        );
    }

    #[test]
    fn extreme_inputs_saturate_instead_of_failing() {
        let earliest = device_time(i64::from(i32::MIN));
        assert_eq!(
            earliest.unix_timestamp(),
            i64::from(i32::MIN) + layout::DEVICE_EPOCH_OFFSET
        );
        let latest = OffsetDateTime::UNIX_EPOCH.saturating_add(Duration::MAX);
        assert_eq!(device_time(i64::MAX), latest);
        let oldest = OffsetDateTime::UNIX_EPOCH.saturating_add(Duration::MIN);
        assert_eq!(device_time(i64::MIN), oldest);
    }

    #[test]
    fn table_header_fields_follow_uuid() {
        let mut payload = vec![0u8; 16];
        payload.extend_from_slice(&3i32.to_le_bytes());
        payload.extend_from_slice(&600u32.to_le_bytes());

        let mut reader = WeatherReader::new(&payload);
        assert!(reader.has_table());
        let header = reader.read_table_header().unwrap();
        assert_eq!(header.uuid, "00000000-0000-0000-0000-000000000000");
        assert_eq!(header.entry_count, 3);
        assert_eq!(header.last_updated, 600);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn short_entry_reports_missing_field() {
        let payload = vec![0u8; layout::ENTRY_LEN - 1];
        let mut reader = WeatherReader::new(&payload);
        let err = reader.read_entry().unwrap_err();
        assert_eq!(err, CursorError::TooShort { needed: 8, actual: 7 });
    }
}
