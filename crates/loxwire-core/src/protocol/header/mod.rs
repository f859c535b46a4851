//! Message header decoding.
//!
//! Every message on the controller stream starts with an 8-byte header that
//! names the payload type and its length. The caller reads exactly
//! `Header::length` payload bytes after each header before reading the next
//! one. Offsets live in `layout`.

pub mod error;
pub mod layout;
pub mod parser;

pub use error::HeaderError;
pub use parser::{EventType, Header, decode_header, encode_header};
