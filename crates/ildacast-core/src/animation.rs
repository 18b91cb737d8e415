use std::fmt;

use crate::formats::ilda::{Format, Header, layout};

/// 8-bit RGB color as resolved at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A decoded point with its final color.
///
/// Indexed formats resolve the color index through the palette while the
/// record is read, so a point never carries an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i16,
    pub y: i16,
    /// Zero for 2D formats.
    pub z: i16,
    pub status: u8,
    pub color: Rgb,
}

impl Point {
    /// Bit 6 of the status byte: laser off for this point.
    pub fn is_blanked(&self) -> bool {
        self.status & layout::STATUS_BLANKED_MASK != 0
    }
}

/// Color lookup table used by the indexed point formats.
///
/// Every entry starts out white. Palette sections overwrite entries in scan
/// order and the table lives for exactly one decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [Rgb; layout::PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: [Rgb::WHITE; layout::PALETTE_SIZE],
        }
    }
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: u8) -> Rgb {
        self.entries[usize::from(index)]
    }

    pub fn set(&mut self, index: u8, color: Rgb) {
        self.entries[usize::from(index)] = color;
    }

    pub fn entries(&self) -> &[Rgb; layout::PALETTE_SIZE] {
        &self.entries
    }
}

/// One point section of the source, in playback order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub format: Format,
    pub header: Header,
    pub points: Vec<Point>,
}

impl Frame {
    /// True when the buffer ended before every declared record was read.
    pub fn is_partial(&self) -> bool {
        self.points.len() < usize::from(self.header.records)
    }

    pub fn blanked_points(&self) -> usize {
        self.points.iter().filter(|point| point.is_blanked()).count()
    }
}

/// Reason the section scan stopped.
///
/// None of these is an error: the decoder always returns what it read before
/// stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    /// The buffer ended exactly on a section boundary.
    EndOfData,
    /// Fewer bytes than a header remained.
    TruncatedHeader { remaining: usize },
    /// The next section did not start with the `ILDA` magic.
    BadMagic { offset: usize },
    /// The next section declared a format code outside 0, 1, 2, 4, 5.
    UnknownFormat { code: u8, offset: usize },
    /// A section ended before all its declared records were read.
    TruncatedRecords {
        format: Format,
        expected: u16,
        read: u16,
    },
}

impl ScanEnd {
    pub fn is_complete(&self) -> bool {
        matches!(self, ScanEnd::EndOfData)
    }
}

impl fmt::Display for ScanEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanEnd::EndOfData => write!(f, "end of data"),
            ScanEnd::TruncatedHeader { remaining } => {
                write!(f, "truncated header ({remaining} trailing bytes)")
            }
            ScanEnd::BadMagic { offset } => write!(f, "missing ILDA magic at offset {offset}"),
            ScanEnd::UnknownFormat { code, offset } => {
                write!(f, "unknown format code {code} at offset {offset}")
            }
            ScanEnd::TruncatedRecords {
                format,
                expected,
                read,
            } => write!(
                f,
                "truncated {} section ({read} of {expected} records)",
                format.label()
            ),
        }
    }
}

/// Result of decoding an ILDA buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    /// Point sections in source order.
    pub frames: Vec<Frame>,
    /// Palette state at the end of the scan.
    pub palette: Palette,
    /// Palette sections applied during the scan.
    pub palette_sections: usize,
    pub end: ScanEnd,
}

impl Animation {
    pub fn points_total(&self) -> usize {
        self.frames.iter().map(|frame| frame.points.len()).sum()
    }

    pub fn into_parts(self) -> (Vec<Frame>, Palette) {
        (self.frames, self.palette)
    }
}
