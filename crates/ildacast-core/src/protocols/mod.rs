//! Wire protocol encoding and decoding.
//!
//! Each protocol follows a layered structure:
//! - `layout`: type tags, record widths and offsets (source of truth)
//! - `reader`: safe byte access for decoding datagrams
//! - `encoder`/`parser`: domain-level encoding and decoding
//! - `error`: explicit, actionable errors
//!
//! Encoders and parsers are pure; the player owns the socket.

pub mod iwp;
