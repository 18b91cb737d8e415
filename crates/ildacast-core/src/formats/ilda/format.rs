use std::fmt;

use super::error::IldaError;
use super::layout;
use super::reader::IldaReader;
use crate::animation::{Palette, Point, Rgb};

/// Section record layouts, selected by the header's format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Code 0: x, y, z, status, palette index.
    Indexed3d,
    /// Code 1: x, y, status, palette index.
    Indexed2d,
    /// Code 2: R, G, B palette entry.
    Palette,
    /// Code 4: x, y, z, status, B, G, R.
    TrueColor3d,
    /// Code 5: x, y, status, B, G, R.
    TrueColor2d,
}

/// One decoded section record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Point(Point),
    PaletteEntry(Rgb),
}

impl TryFrom<u8> for Format {
    type Error = IldaError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            layout::FORMAT_INDEXED_3D => Ok(Format::Indexed3d),
            layout::FORMAT_INDEXED_2D => Ok(Format::Indexed2d),
            layout::FORMAT_PALETTE => Ok(Format::Palette),
            layout::FORMAT_TRUE_COLOR_3D => Ok(Format::TrueColor3d),
            layout::FORMAT_TRUE_COLOR_2D => Ok(Format::TrueColor2d),
            code => Err(IldaError::UnknownFormat { code }),
        }
    }
}

impl Format {
    pub fn code(self) -> u8 {
        match self {
            Format::Indexed3d => layout::FORMAT_INDEXED_3D,
            Format::Indexed2d => layout::FORMAT_INDEXED_2D,
            Format::Palette => layout::FORMAT_PALETTE,
            Format::TrueColor3d => layout::FORMAT_TRUE_COLOR_3D,
            Format::TrueColor2d => layout::FORMAT_TRUE_COLOR_2D,
        }
    }

    pub fn record_len(self) -> usize {
        match self {
            Format::Indexed3d => layout::INDEXED_3D_RECORD_LEN,
            Format::Indexed2d => layout::INDEXED_2D_RECORD_LEN,
            Format::Palette => layout::PALETTE_RECORD_LEN,
            Format::TrueColor3d => layout::TRUE_COLOR_3D_RECORD_LEN,
            Format::TrueColor2d => layout::TRUE_COLOR_2D_RECORD_LEN,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Format::Indexed3d => "indexed-3d",
            Format::Indexed2d => "indexed-2d",
            Format::Palette => "palette",
            Format::TrueColor3d => "true-color-3d",
            Format::TrueColor2d => "true-color-2d",
        }
    }

    pub fn is_point_format(self) -> bool {
        !matches!(self, Format::Palette)
    }

    fn is_3d(self) -> bool {
        matches!(self, Format::Indexed3d | Format::TrueColor3d)
    }

    fn status_offset(self) -> usize {
        if self.is_3d() {
            layout::STATUS_OFFSET_3D
        } else {
            layout::STATUS_OFFSET_2D
        }
    }

    /// Decode one record of this layout.
    ///
    /// Indexed colors are resolved against `palette` as it is right now.
    pub fn decode_record(self, record: &[u8], palette: &Palette) -> Result<Record, IldaError> {
        let reader = IldaReader::new(record);
        reader.require_len(self.record_len())?;

        if self == Format::Palette {
            let color = Rgb::new(reader.read_u8(0)?, reader.read_u8(1)?, reader.read_u8(2)?);
            return Ok(Record::PaletteEntry(color));
        }

        let x = reader.read_i16_be(layout::X_RANGE)?;
        let y = reader.read_i16_be(layout::Y_RANGE)?;
        let z = if self.is_3d() {
            reader.read_i16_be(layout::Z_RANGE)?
        } else {
            0
        };
        let status_offset = self.status_offset();
        let status = reader.read_u8(status_offset)?;
        let color = match self {
            Format::Indexed3d | Format::Indexed2d => {
                palette.get(reader.read_u8(status_offset + 1)?)
            }
            _ => {
                // True-color records store blue, green, red.
                let b = reader.read_u8(status_offset + 1)?;
                let g = reader.read_u8(status_offset + 2)?;
                let r = reader.read_u8(status_offset + 3)?;
                Rgb::new(r, g, b)
            }
        };

        Ok(Record::Point(Point {
            x,
            y,
            z,
            status,
            color,
        }))
    }

    /// Append one record of this layout to `out`.
    ///
    /// Indexed layouts write `index`, the others write `color`. 2D layouts
    /// drop `z`.
    pub fn encode_record(self, record: &PointRecord, out: &mut Vec<u8>) {
        if self == Format::Palette {
            out.extend_from_slice(&[record.color.r, record.color.g, record.color.b]);
            return;
        }

        out.extend_from_slice(&record.x.to_be_bytes());
        out.extend_from_slice(&record.y.to_be_bytes());
        if self.is_3d() {
            out.extend_from_slice(&record.z.to_be_bytes());
        }
        out.push(record.status);
        match self {
            Format::Indexed3d | Format::Indexed2d => out.push(record.index),
            _ => out.extend_from_slice(&[record.color.b, record.color.g, record.color.r]),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw record content used when writing ILDA sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRecord {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub status: u8,
    pub index: u8,
    pub color: Rgb,
}

impl PointRecord {
    pub fn indexed(x: i16, y: i16, index: u8) -> Self {
        Self {
            x,
            y,
            z: 0,
            status: 0,
            index,
            color: Rgb::WHITE,
        }
    }

    pub fn rgb(x: i16, y: i16, color: Rgb) -> Self {
        Self {
            x,
            y,
            z: 0,
            status: 0,
            index: 0,
            color,
        }
    }

    pub fn with_z(mut self, z: i16) -> Self {
        self.z = z;
        self
    }

    pub fn blanked(mut self) -> Self {
        self.status |= layout::STATUS_BLANKED_MASK;
        self
    }
}
