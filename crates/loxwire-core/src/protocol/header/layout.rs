pub const HEADER_LEN: usize = 8;

pub const MARKER_OFFSET: usize = 0;
pub const EVENT_TYPE_OFFSET: usize = 1;
pub const FLAGS_OFFSET: usize = 2;
pub const LENGTH_RANGE: std::ops::Range<usize> = 4..8;

/// Marker the controller writes into the reserved first byte.
pub const BINARY_MARKER: u8 = 0x03;
pub const ESTIMATED_FLAG: u8 = 0x80;

pub const TYPE_TEXT: u8 = 0;
pub const TYPE_FILE: u8 = 1;
pub const TYPE_EVENT: u8 = 2;
pub const TYPE_EVENT_TEXT: u8 = 3;
pub const TYPE_DAYTIMER: u8 = 4;
pub const TYPE_OUT_OF_SERVICE: u8 = 5;
pub const TYPE_KEEPALIVE: u8 = 6;
pub const TYPE_WEATHER: u8 = 7;
