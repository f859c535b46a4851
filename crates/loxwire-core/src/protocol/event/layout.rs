use crate::protocol::uuid::UUID_LEN;

pub const VALUE_RECORD_LEN: usize = UUID_LEN + 8;

/// Fixed part of a text record: uuid, icon uuid and the text length.
pub const TEXT_PREFIX_LEN: usize = UUID_LEN + UUID_LEN + 4;
pub const TEXT_ALIGNMENT: usize = 4;
