use super::format::{Format, PointRecord};
use super::layout;
use crate::animation::Rgb;

/// Builder for well-formed ILDA byte streams.
///
/// Point sections get consecutive frame numbers; the total-frame field of
/// every point section is filled in by [`IldaWriter::finish`].
///
/// # Examples
/// ```
/// use ildacast_core::{Format, IldaWriter, PointRecord, Rgb, decode};
///
/// let mut writer = IldaWriter::new();
/// writer
///     .names("logo", "acme")
///     .palette(&[Rgb::new(255, 0, 0)])
///     .frame(Format::Indexed3d, &[PointRecord::indexed(0, 0, 0).with_z(5)]);
/// let animation = decode(&writer.finish());
/// assert_eq!(animation.frames[0].points[0].color, Rgb::new(255, 0, 0));
/// assert_eq!(animation.frames[0].header.frame_name, "logo");
/// ```
#[derive(Debug, Default)]
pub struct IldaWriter {
    buf: Vec<u8>,
    frame_name: [u8; layout::NAME_LEN],
    company_name: [u8; layout::NAME_LEN],
    projector: u8,
    frame_headers: Vec<usize>,
}

impl IldaWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name fields used by the following sections.
    ///
    /// Names longer than eight bytes are cut.
    pub fn names(&mut self, frame_name: &str, company_name: &str) -> &mut Self {
        self.frame_name = name_field(frame_name);
        self.company_name = name_field(company_name);
        self
    }

    pub fn projector(&mut self, projector: u8) -> &mut Self {
        self.projector = projector;
        self
    }

    /// Write a raw header with an arbitrary format code and record count.
    pub fn header(&mut self, format_code: u8, records: u16) -> &mut Self {
        let frame_index = u16::try_from(self.frame_headers.len()).unwrap_or(u16::MAX);
        let mut header = [0u8; layout::HEADER_LEN];
        header[layout::MAGIC_RANGE].copy_from_slice(layout::MAGIC);
        header[layout::FORMAT_OFFSET] = format_code;
        header[layout::FRAME_NAME_RANGE].copy_from_slice(&self.frame_name);
        header[layout::COMPANY_NAME_RANGE].copy_from_slice(&self.company_name);
        header[layout::RECORDS_RANGE].copy_from_slice(&records.to_be_bytes());
        header[layout::FRAME_INDEX_RANGE].copy_from_slice(&frame_index.to_be_bytes());
        header[layout::PROJECTOR_OFFSET] = self.projector;

        if format_code != layout::FORMAT_PALETTE {
            self.frame_headers.push(self.buf.len());
        }
        self.buf.extend_from_slice(&header);
        self
    }

    /// Write a section of `format` holding `records`.
    pub fn frame(&mut self, format: Format, records: &[PointRecord]) -> &mut Self {
        let count = u16::try_from(records.len()).unwrap_or(u16::MAX);
        self.header(format.code(), count);
        self.buf.reserve(usize::from(count) * format.record_len());
        for record in records.iter().take(usize::from(count)) {
            format.encode_record(record, &mut self.buf);
        }
        self
    }

    /// Write a palette section; entry `i` overwrites palette index `i`.
    pub fn palette(&mut self, colors: &[Rgb]) -> &mut Self {
        let records: Vec<PointRecord> = colors
            .iter()
            .map(|color| PointRecord::rgb(0, 0, *color))
            .collect();
        self.frame(Format::Palette, &records)
    }

    /// Write the zero-record section that conventionally ends an ILDA file.
    pub fn terminator(&mut self) -> &mut Self {
        self.header(layout::FORMAT_INDEXED_3D, 0)
    }

    pub fn finish(mut self) -> Vec<u8> {
        let total = u16::try_from(self.frame_headers.len()).unwrap_or(u16::MAX);
        for offset in &self.frame_headers {
            let start = offset + layout::TOTAL_FRAMES_RANGE.start;
            self.buf[start..start + 2].copy_from_slice(&total.to_be_bytes());
        }
        self.buf
    }
}

fn name_field(name: &str) -> [u8; layout::NAME_LEN] {
    let mut field = [0u8; layout::NAME_LEN];
    let bytes = name.as_bytes();
    let len = bytes.len().min(layout::NAME_LEN);
    field[..len].copy_from_slice(&bytes[..len]);
    field
}
