//! Wire decoding modules.
//!
//! Each wire segment follows a layered structure:
//! - `layout`: byte offsets, record sizes and constants (source of truth)
//! - `reader`: bounds-checked byte access and wire conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Everything here is pure and synchronous; framing and I/O live in
//! `source`.

pub mod common;
pub mod event;
pub mod header;
pub mod uuid;
pub mod weather;
