//! ILDA image data transfer format decoding.
//!
//! An ILDA buffer is a run of sections, each a 32-byte header followed by
//! `records` fixed-width records. The header's format code selects the
//! record layout: 3D or 2D points with palette-indexed color (codes 0 and
//! 1), palette entries (code 2), or 3D or 2D points with true color stored
//! blue-green-red (codes 4 and 5). There is no frame count up front; the
//! decoder walks sections until the data runs out.
//!
//! Palette sections mutate a 256-entry table threaded through the scan, so
//! an indexed point takes the palette entry in effect when it is read.
//! Truncation, a missing magic or an unknown format code end the scan
//! without an error. Byte offsets live in `layout`, field conventions in
//! `reader`, per-layout record handling in `format`.

pub mod error;
pub mod format;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use format::{Format, PointRecord};
pub use parser::{Header, decode, read_header};
pub use writer::IldaWriter;
