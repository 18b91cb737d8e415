//! ildacast core library: ILDA decoding and IWP streaming.
//!
//! This crate implements the pipeline used by the CLI: an animation source
//! supplies raw bytes, the ILDA decoder (layout/reader/format/parser) turns
//! them into ordered frames and a palette, and the player maps every point
//! into IWP samples, packs them into size-bounded datagrams and sends them to
//! the projector controller over UDP. Parsing and encoding are byte-oriented
//! and side-effect free; all I/O is isolated in `source` and
//! `player::transport`.
//!
//! Invariants:
//! - Decoding never fails. Truncated or unknown input ends the scan and the
//!   frames read so far are returned together with a [`ScanEnd`] reason.
//! - The palette is scan-order state: a point sees the palette as it was when
//!   the point's record was read.
//! - A scan-period datagram is always sent before any point datagram.
//!
//! # Examples
//! ```no_run
//! use std::net::SocketAddr;
//! use std::path::Path;
//!
//! use ildacast_core::{Player, PlayerConfig, StopFlag, UdpTransport, load_animation_file};
//!
//! let animation = load_animation_file(Path::new("show.ild"))?;
//! let target: SocketAddr = "192.168.1.123:7200".parse()?;
//! let transport = UdpTransport::bind(target)?;
//! let mut player = Player::new(transport, PlayerConfig::default())?;
//! let stats = player.play(&animation.frames, &StopFlag::new())?;
//! println!("sent {} packets", stats.packets_sent);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod animation;
pub mod formats;
mod inspect;
pub mod player;
pub mod protocols;
mod source;

pub use animation::{Animation, Frame, Palette, Point, Rgb, ScanEnd};
pub use formats::ilda::{Format, Header, IldaWriter, PointRecord, decode};
pub use inspect::{InspectError, inspect_file, inspect_source};
pub use player::transport::{DatagramTransport, TransportError, UdpTransport};
pub use player::{
    PlaybackStats, Player, PlayerConfig, PlayerError, Repeat, SendErrorPolicy, StopFlag,
    scan_period_us,
};
pub use protocols::iwp::{ColorDepth, Command, PacketEncoder, Sample, map_point, parse_datagram};
pub use source::{
    AnimationSource, FileSource, MemorySource, SourceError, load_animation, load_animation_file,
};

/// Current inspection report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decode summary of an ILDA file with frames in source order.
///
/// # Examples
/// ```
/// use ildacast_core::make_stub_report;
///
/// let report = make_stub_report("show.ild", 64);
/// assert_eq!(report.report_version, ildacast_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input file metadata.
    pub input: InputInfo,
    /// Why the scan stopped (e.g., "end of data", "unknown format code 9").
    pub scan_end: String,
    /// True when the scan consumed the whole buffer.
    pub scan_complete: bool,
    /// Number of palette sections applied during the scan.
    pub palette_sections: u64,
    /// Total decoded points across all frames.
    pub points_total: u64,
    /// Per-frame summaries in playback order.
    pub frames: Vec<FrameSummary>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input file metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the inspector.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Summary of a single decoded frame.
///
/// # Examples
/// ```
/// use ildacast_core::FrameSummary;
///
/// let frame = FrameSummary {
///     index: 0,
///     format: "indexed-3d".to_string(),
///     name: "square".to_string(),
///     company: None,
///     frame_number: 0,
///     total_frames: 1,
///     projector: 0,
///     declared_records: 4,
///     points: 4,
///     blanked_points: 1,
/// };
/// assert!(!frame.is_partial());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSummary {
    /// Position in playback order.
    pub index: u64,
    /// Record layout label (e.g., "indexed-3d", "true-color-2d").
    pub format: String,
    /// Frame name from the section header.
    pub name: String,
    /// Company name from the section header, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Frame number as declared by the header.
    pub frame_number: u16,
    /// Total frame count as declared by the header.
    pub total_frames: u16,
    /// Projector index from the header.
    pub projector: u8,
    /// Record count declared by the header.
    pub declared_records: u16,
    /// Points actually decoded.
    pub points: u64,
    /// Decoded points with the blanking bit set.
    pub blanked_points: u64,
}

impl FrameSummary {
    /// True when the buffer ended before all declared records were read.
    pub fn is_partial(&self) -> bool {
        self.points < u64::from(self.declared_records)
    }
}

/// Build a stub report with base fields filled and no frames.
///
/// # Examples
/// ```
/// use ildacast_core::make_stub_report;
///
/// let report = make_stub_report("show.ild", 64);
/// assert!(report.frames.is_empty());
/// assert_eq!(report.input.bytes, 64);
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> AnimationReport {
    AnimationReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "ildacast".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        scan_end: ScanEnd::EndOfData.to_string(),
        scan_complete: true,
        palette_sections: 0,
        points_total: 0,
        frames: vec![],
    }
}
