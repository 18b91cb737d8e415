//! IWP (ILDAWaveX16 protocol) encoding.
//!
//! IWP datagrams are a concatenation of self-delimiting records, each led by
//! a one-byte type tag: turn off (0), scan period in microseconds (1), and
//! points with 16-bit X/Y plus 8-bit (2) or 16-bit (3) color. All multi-byte
//! fields are big-endian and a datagram carries at most 1023 bytes.
//!
//! `mapper` converts decoded ILDA points into IWP samples, `encoder` packs
//! samples into datagrams and `parser` decodes datagrams the way the
//! controller does. Offsets and tags live in `layout`.

pub mod encoder;
pub mod error;
pub mod layout;
pub mod mapper;
pub mod parser;
pub mod reader;

pub use encoder::{ColorDepth, PacketEncoder, period_packet, turn_off_packet};
pub use mapper::{Sample, map_point};
pub use parser::{Command, parse_datagram};
