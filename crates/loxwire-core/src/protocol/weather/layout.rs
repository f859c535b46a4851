use crate::protocol::uuid::UUID_LEN;

/// Seconds between the unix epoch and the controller epoch (2009-01-01T00:00:00Z).
pub const DEVICE_EPOCH_OFFSET: i64 = 1_230_768_000;

/// Table header: uuid, entry count (`i32`), last update (`u32`, device epoch).
pub const TABLE_HEADER_LEN: usize = UUID_LEN + 4 + 4;

pub const ENTRY_INT_FIELDS: usize = 5;
pub const ENTRY_FLOAT_FIELDS: usize = 6;
pub const ENTRY_LEN: usize = ENTRY_INT_FIELDS * 4 + ENTRY_FLOAT_FIELDS * 8;
