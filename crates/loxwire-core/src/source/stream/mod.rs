//! Byte-stream message source.
//!
//! Reads header/payload pairs from a recorded capture or any other
//! `std::io::Read`. A clean end of input between frames ends the stream;
//! running out of bytes inside a frame is an error.

pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::StreamSource;
