use log::warn;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::error::WeatherError;
use super::layout;
use super::reader::{WeatherReader, device_time};

/// Weather table for one weather server, newest data last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEventTable {
    pub uuid: String,
    /// Entry count as declared on the wire (may be negative).
    pub entry_count: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
    pub entries: Vec<WeatherEvent>,
}

/// Single forecast/observation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEvent {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
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

/// Decode a weather payload, yielding no tables at all if any field is short.
///
/// # Examples
/// ```
/// use loxwire_core::decode_weather_tables;
///
/// let mut payload = vec![0u8; 16];
/// payload.extend_from_slice(&0i32.to_le_bytes());
/// payload.extend_from_slice(&0u32.to_le_bytes());
/// let tables = decode_weather_tables(&payload);
/// assert_eq!(tables.len(), 1);
/// assert_eq!(tables[0].last_updated.unix_timestamp(), 1_230_768_000);
/// ```
pub fn decode_weather_tables(payload: &[u8]) -> Vec<WeatherEventTable> {
    match try_decode_weather_tables(payload) {
        Ok(tables) => tables,
        Err(err) => {
            warn!("discarding weather payload of {} bytes: {err}", payload.len());
            Vec::new()
        }
    }
}

/// Decode a weather payload, reporting why it was rejected.
///
/// Tables are read while at least a full table header remains; a shorter
/// tail is ignored.
///
/// # Errors
/// Returns `WeatherError` for the first field that cannot be fully read. No
/// tables are returned in that case, including ones decoded before it.
pub fn try_decode_weather_tables(payload: &[u8]) -> Result<Vec<WeatherEventTable>, WeatherError> {
    let mut reader = WeatherReader::new(payload);
    let mut tables = Vec::new();
    while reader.has_table() {
        let table = decode_table(&mut reader, tables.len())?;
        tables.push(table);
    }
    Ok(tables)
}

fn decode_table(
    reader: &mut WeatherReader<'_>,
    table: usize,
) -> Result<WeatherEventTable, WeatherError> {
    let header = reader
        .read_table_header()
        .map_err(|source| WeatherError::TruncatedTable { table, source })?;
    let last_updated = device_time(i64::from(header.last_updated));

    let count = usize::try_from(header.entry_count).unwrap_or(0);
    let mut entries = Vec::with_capacity(count.min(reader.remaining() / layout::ENTRY_LEN));
    for entry in 0..count {
        let raw = reader
            .read_entry()
            .map_err(|source| WeatherError::TruncatedEntry {
                table,
                entry,
                source,
            })?;
        entries.push(raw.into_event());
    }

    Ok(WeatherEventTable {
        uuid: header.uuid,
        entry_count: header.entry_count,
        last_updated,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_weather_tables, try_decode_weather_tables};
    use crate::protocol::common::CursorError;
    use crate::protocol::weather::error::WeatherError;
    use crate::protocol::weather::layout;

    fn table_header(uuid: [u8; 16], entries: i32, last_updated: u32) -> Vec<u8> {
        let mut bytes = uuid.to_vec();
        bytes.extend_from_slice(&entries.to_le_bytes());
        bytes.extend_from_slice(&last_updated.to_le_bytes());
        bytes
    }

    fn entry(timestamp: i32, temperature: f64) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(layout::ENTRY_LEN);
        for value in [timestamp, 2, 180, 350, 65] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        for value in [temperature, temperature - 1.5, 8.25, 0.4, 3.6, 1013.2] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn decodes_single_table_with_entries() {
        let mut payload = table_header([0x11; 16], 2, 3600);
        payload.extend(entry(0, 20.0));
        payload.extend(entry(3600, 21.5));

        let tables = try_decode_weather_tables(&payload).unwrap();
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.uuid, "11111111-1111-1111-1111-111111111111");
        assert_eq!(table.entry_count, 2);
        assert_eq!(
            table.last_updated.unix_timestamp(),
            layout::DEVICE_EPOCH_OFFSET + 3600
        );
        assert_eq!(table.entries.len(), 2);

        let first = &table.entries[0];
        assert_eq!(first.timestamp.unix_timestamp(), 1_230_768_000);
        assert_eq!(first.weather_type, 2);
        assert_eq!(first.wind_direction, 180);
        assert_eq!(first.solar_radiation, 350);
        assert_eq!(first.relative_humidity, 65);
        assert_eq!(first.temperature, 20.0);
        assert_eq!(first.perceived_temperature, 18.5);
        assert_eq!(first.dew_point, 8.25);
        assert_eq!(first.precipitation, 0.4);
        assert_eq!(first.wind_speed, 3.6);
        assert_eq!(first.barometric_pressure, 1013.2);
        assert_eq!(table.entries[1].temperature, 21.5);
    }

    #[test]
    fn decodes_consecutive_tables_in_order() {
        let mut payload = table_header([0x01; 16], 1, 0);
        payload.extend(entry(10, 1.0));
        payload.extend(table_header([0x02; 16], 0, 0));
        payload.extend(table_header([0x03; 16], 1, 0));
        payload.extend(entry(20, 3.0));

        let tables = decode_weather_tables(&payload);
        let uuids: Vec<&str> = tables.iter().map(|t| &t.uuid[..8]).collect();
        assert_eq!(uuids, vec!["01010101", "02020202", "03030303"]);
        assert!(tables[1].entries.is_empty());
        assert_eq!(tables[2].entries[0].temperature, 3.0);
    }

    #[test]
    fn short_trailer_after_tables_is_ignored() {
        let mut payload = table_header([0x01; 16], 0, 0);
        payload.extend_from_slice(&[0u8; layout::TABLE_HEADER_LEN - 1]);
        let tables = try_decode_weather_tables(&payload).unwrap();
        assert_eq!(tables.len(), 1);
    }

    #[test]
    fn truncated_entries_discard_whole_payload() {
        let mut payload = table_header([0x01; 16], 1, 0);
        payload.extend(entry(0, 5.0));
        payload.extend(table_header([0x02; 16], 3, 0));
        payload.extend(entry(0, 6.0));

        assert!(decode_weather_tables(&payload).is_empty());
        let err = try_decode_weather_tables(&payload).unwrap_err();
        assert_eq!(
            err,
            WeatherError::TruncatedEntry {
                table: 1,
                entry: 1,
                source: CursorError::TooShort { needed: 4, actual: 0 },
            }
        );
    }

    #[test]
    fn declared_three_entries_with_one_present_yields_nothing() {
        let mut payload = table_header([0x05; 16], 3, 0);
        payload.extend(entry(0, 5.0));
        assert!(decode_weather_tables(&payload).is_empty());
    }

    #[test]
    fn negative_entry_count_reads_no_entries() {
        let payload = table_header([0x07; 16], -4, 0);
        let tables = try_decode_weather_tables(&payload).unwrap();
        assert_eq!(tables[0].entry_count, -4);
        assert!(tables[0].entries.is_empty());
    }

    #[test]
    fn huge_entry_count_fails_without_large_allocation() {
        let payload = table_header([0x07; 16], i32::MAX, 0);
        let err = try_decode_weather_tables(&payload).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::TruncatedEntry {
                table: 0,
                entry: 0,
                ..
            }
        ));
    }

    #[test]
    fn empty_and_short_payloads_yield_no_tables() {
        assert!(try_decode_weather_tables(&[]).unwrap().is_empty());
        assert!(
            try_decode_weather_tables(&[0u8; layout::TABLE_HEADER_LEN - 1])
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn negative_entry_timestamp_precedes_device_epoch() {
        let mut payload = table_header([0x01; 16], 1, 0);
        payload.extend(entry(-60, 0.0));
        let tables = decode_weather_tables(&payload);
        assert_eq!(
            tables[0].entries[0].timestamp.unix_timestamp(),
            layout::DEVICE_EPOCH_OFFSET - 60
        );
    }
}
