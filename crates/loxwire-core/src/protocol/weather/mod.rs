//! Weather table decoding.
//!
//! A weather payload is a concatenation of tables, each a 24-byte header
//! followed by `entry_count` 68-byte entries. Timestamps count seconds from
//! the controller epoch (2009-01-01T00:00:00Z) and are converted to absolute
//! UTC time.
//!
//! Decoding is strict: a single short field rejects the whole payload, unlike
//! the lenient value/text event decoders. `try_decode_weather_tables` exposes
//! the failure; `decode_weather_tables` logs it and returns no tables.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::WeatherError;
pub use parser::{
    WeatherEvent, WeatherEventTable, decode_weather_tables, try_decode_weather_tables,
};
