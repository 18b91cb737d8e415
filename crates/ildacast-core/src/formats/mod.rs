//! Animation file formats.
//!
//! Each format follows the same layered structure as the wire protocols:
//! - `layout`: byte offsets, sizes and codes (source of truth)
//! - `reader`: safe byte access and field conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit reasons a read stopped
//!
//! Parsers are pure and contain no I/O; the `source` module handles file
//! access.

pub mod ilda;
