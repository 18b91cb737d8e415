use super::error::IldaError;
use super::format::{Format, Record};
use super::layout;
use super::reader::IldaReader;
use crate::animation::{Animation, Frame, Palette, ScanEnd};

/// Section header as read from the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Raw format code; may be a code this decoder does not know.
    pub format_code: u8,
    pub frame_name: String,
    pub company_name: String,
    pub records: u16,
    pub frame_index: u16,
    pub total_frames: u16,
    pub projector: u8,
}

/// Read a section header at the start of `bytes`.
pub fn read_header(bytes: &[u8]) -> Result<Header, IldaError> {
    let reader = IldaReader::new(bytes);
    reader.require_len(layout::HEADER_LEN)?;
    if reader.read_magic()? != layout::MAGIC {
        return Err(IldaError::BadMagic);
    }

    Ok(Header {
        format_code: reader.read_u8(layout::FORMAT_OFFSET)?,
        frame_name: reader.read_name(layout::FRAME_NAME_RANGE)?,
        company_name: reader.read_name(layout::COMPANY_NAME_RANGE)?,
        records: reader.read_u16_be(layout::RECORDS_RANGE)?,
        frame_index: reader.read_u16_be(layout::FRAME_INDEX_RANGE)?,
        total_frames: reader.read_u16_be(layout::TOTAL_FRAMES_RANGE)?,
        projector: reader.read_u8(layout::PROJECTOR_OFFSET)?,
    })
}

struct Section {
    frame: Option<Frame>,
    records_read: u16,
    consumed: usize,
}

/// Decode an ILDA buffer into frames and the final palette.
///
/// The scan walks sections until the data ends, a header is missing or
/// malformed, or a format code is unknown. Whatever was decoded before that
/// point is returned; the reason is recorded in [`Animation::end`].
///
/// # Examples
/// ```
/// use ildacast_core::{Format, IldaWriter, PointRecord, decode};
///
/// let mut writer = IldaWriter::new();
/// writer.frame(Format::Indexed2d, &[PointRecord::indexed(0, 0, 1)]);
/// let animation = decode(&writer.finish());
/// assert_eq!(animation.frames.len(), 1);
/// assert!(animation.end.is_complete());
/// ```
pub fn decode(bytes: &[u8]) -> Animation {
    let mut palette = Palette::default();
    let mut frames = Vec::new();
    let mut palette_sections = 0usize;
    let mut cursor = 0usize;

    let end = loop {
        let remaining = &bytes[cursor..];
        if remaining.is_empty() {
            break ScanEnd::EndOfData;
        }

        let header = match read_header(remaining) {
            Ok(header) => header,
            Err(IldaError::BadMagic) => break ScanEnd::BadMagic { offset: cursor },
            Err(_) => {
                break ScanEnd::TruncatedHeader {
                    remaining: remaining.len(),
                };
            }
        };
        let format = match Format::try_from(header.format_code) {
            Ok(format) => format,
            Err(_) => {
                break ScanEnd::UnknownFormat {
                    code: header.format_code,
                    offset: cursor,
                };
            }
        };
        cursor += layout::HEADER_LEN;

        tracing::debug!(
            offset = cursor - layout::HEADER_LEN,
            format = format.label(),
            records = header.records,
            name = %header.frame_name,
            "ILDA section"
        );

        let expected = header.records;
        let section = decode_section(&bytes[cursor..], format, header, &mut palette);
        cursor += section.consumed;
        match section.frame {
            Some(frame) => frames.push(frame),
            None => palette_sections += 1,
        }

        if section.records_read < expected {
            tracing::warn!(
                format = format.label(),
                expected,
                read = section.records_read,
                "section truncated"
            );
            break ScanEnd::TruncatedRecords {
                format,
                expected,
                read: section.records_read,
            };
        }
    };

    tracing::debug!(frames = frames.len(), palette_sections, end = %end, "ILDA scan finished");

    Animation {
        frames,
        palette,
        palette_sections,
        end,
    }
}

fn decode_section(
    body: &[u8],
    format: Format,
    header: Header,
    palette: &mut Palette,
) -> Section {
    let record_len = format.record_len();
    let mut points = Vec::new();
    let mut records_read = 0u16;

    for (index, record) in body
        .chunks_exact(record_len)
        .take(usize::from(header.records))
        .enumerate()
    {
        records_read += 1;
        // Every chunk has the exact record width, so decoding cannot fail.
        match format.decode_record(record, palette) {
            Ok(Record::Point(point)) => points.push(point),
            Ok(Record::PaletteEntry(color)) => {
                if let Ok(index) = u8::try_from(index) {
                    palette.set(index, color);
                }
            }
            Err(_) => break,
        }
    }

    let frame = format.is_point_format().then(|| Frame {
        format,
        header,
        points,
    });

    Section {
        frame,
        records_read,
        consumed: usize::from(records_read) * record_len,
    }
}
