use super::error::IwpError;
use super::layout;
use super::mapper::Sample;
use super::reader::IwpReader;

/// One record of an IWP datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stop output and clear the point buffer.
    TurnOff,
    /// Scan period in microseconds.
    Period { micros: u32 },
    /// Point with 8-bit color channels, as sent.
    PointRgb8 { x: u16, y: u16, r: u8, g: u8, b: u8 },
    /// Point with 16-bit color channels.
    PointRgb16(Sample),
}

/// Decode every record of a datagram, in order.
///
/// Records are self-delimiting by their type tag; a truncated record or an
/// unknown tag fails the whole datagram.
///
/// # Examples
/// ```
/// use ildacast_core::{Command, parse_datagram};
///
/// let commands = parse_datagram(&[1, 0, 0, 0x03, 0xe8, 0]).unwrap();
/// assert_eq!(commands, vec![Command::Period { micros: 1000 }, Command::TurnOff]);
/// ```
pub fn parse_datagram(payload: &[u8]) -> Result<Vec<Command>, IwpError> {
    let datagram = IwpReader::new(payload);
    let mut commands = Vec::new();
    let mut offset = 0usize;

    while offset < datagram.len() {
        let record = datagram.record_at(offset);
        let tag = record.read_u8(0)?;
        let (command, len) = match tag {
            layout::TYPE_TURN_OFF => (Command::TurnOff, layout::TURN_OFF_LEN),
            layout::TYPE_PERIOD => {
                record.require_len(layout::PERIOD_LEN).map_err(|e| rebase(e, offset))?;
                let micros = record.read_u32_be(layout::PERIOD_RANGE)?;
                (Command::Period { micros }, layout::PERIOD_LEN)
            }
            layout::TYPE_POINT_RGB8 => {
                record
                    .require_len(layout::POINT_RGB8_LEN)
                    .map_err(|e| rebase(e, offset))?;
                let command = Command::PointRgb8 {
                    x: record.read_u16_be(layout::X_RANGE)?,
                    y: record.read_u16_be(layout::Y_RANGE)?,
                    r: record.read_u8(layout::RGB8_R_OFFSET)?,
                    g: record.read_u8(layout::RGB8_G_OFFSET)?,
                    b: record.read_u8(layout::RGB8_B_OFFSET)?,
                };
                (command, layout::POINT_RGB8_LEN)
            }
            layout::TYPE_POINT_RGB16 => {
                record
                    .require_len(layout::POINT_RGB16_LEN)
                    .map_err(|e| rebase(e, offset))?;
                let sample = Sample {
                    x: record.read_u16_be(layout::X_RANGE)?,
                    y: record.read_u16_be(layout::Y_RANGE)?,
                    r: record.read_u16_be(layout::RGB16_R_RANGE)?,
                    g: record.read_u16_be(layout::RGB16_G_RANGE)?,
                    b: record.read_u16_be(layout::RGB16_B_RANGE)?,
                };
                (Command::PointRgb16(sample), layout::POINT_RGB16_LEN)
            }
            tag => return Err(IwpError::UnknownType { tag, offset }),
        };
        commands.push(command);
        offset += len;
    }

    Ok(commands)
}

// Report sizes relative to the whole datagram rather than the record.
fn rebase(err: IwpError, offset: usize) -> IwpError {
    match err {
        IwpError::TooShort { needed, actual } => IwpError::TooShort {
            needed: needed + offset,
            actual: actual + offset,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, parse_datagram};
    use crate::protocols::iwp::encoder::{PacketEncoder, period_packet, turn_off_packet};
    use crate::protocols::iwp::error::IwpError;
    use crate::protocols::iwp::{ColorDepth, Sample};

    #[test]
    fn parses_encoded_points() {
        let sample = Sample {
            x: 1,
            y: 2,
            r: 257,
            g: 0,
            b: 65535,
        };
        let packets = PacketEncoder::new(ColorDepth::Rgb16).encode_samples(&[sample, sample]);
        let commands = parse_datagram(&packets[0]).unwrap();
        assert_eq!(
            commands,
            vec![Command::PointRgb16(sample), Command::PointRgb16(sample)]
        );

        let packets = PacketEncoder::new(ColorDepth::Rgb8).encode_samples(&[sample]);
        let commands = parse_datagram(&packets[0]).unwrap();
        assert_eq!(
            commands,
            vec![Command::PointRgb8 {
                x: 1,
                y: 2,
                r: 1,
                g: 0,
                b: 255
            }]
        );
    }

    #[test]
    fn parses_control_packets() {
        assert_eq!(
            parse_datagram(&period_packet(42)).unwrap(),
            vec![Command::Period { micros: 42 }]
        );
        assert_eq!(
            parse_datagram(&turn_off_packet()).unwrap(),
            vec![Command::TurnOff]
        );
        assert!(parse_datagram(&[]).unwrap().is_empty());
    }

    #[test]
    fn truncated_record_fails() {
        let err = parse_datagram(&[0, 3, 0, 1, 0, 2]).unwrap_err();
        assert_eq!(
            err,
            IwpError::TooShort {
                needed: 12,
                actual: 6
            }
        );
    }

    #[test]
    fn unknown_tag_fails() {
        let err = parse_datagram(&[0, 0x7f]).unwrap_err();
        assert_eq!(err, IwpError::UnknownType { tag: 0x7f, offset: 1 });
    }
}
