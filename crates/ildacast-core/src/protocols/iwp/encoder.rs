use super::layout;
use super::mapper::{Sample, downscale_channel, map_point};
use crate::animation::Point;

/// Color resolution of point records on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    /// Type 2 records: 8-bit channels, 8 bytes per point.
    Rgb8,
    /// Type 3 records: 16-bit channels, 11 bytes per point.
    #[default]
    Rgb16,
}

impl ColorDepth {
    pub fn type_tag(self) -> u8 {
        match self {
            ColorDepth::Rgb8 => layout::TYPE_POINT_RGB8,
            ColorDepth::Rgb16 => layout::TYPE_POINT_RGB16,
        }
    }

    pub fn record_len(self) -> usize {
        match self {
            ColorDepth::Rgb8 => layout::POINT_RGB8_LEN,
            ColorDepth::Rgb16 => layout::POINT_RGB16_LEN,
        }
    }
}

/// Packs samples into datagrams no larger than the payload limit.
///
/// Records never straddle two datagrams.
///
/// # Examples
/// ```
/// use ildacast_core::{PacketEncoder, Sample};
///
/// let encoder = PacketEncoder::default();
/// let samples = vec![Sample { x: 0, y: 0, r: 0, g: 0, b: 0 }; 200];
/// let packets = encoder.encode_samples(&samples);
/// assert_eq!(packets.len(), 3);
/// assert_eq!(packets[2].len(), 14 * 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketEncoder {
    depth: ColorDepth,
    max_payload: usize,
}

impl Default for PacketEncoder {
    fn default() -> Self {
        Self::new(ColorDepth::default())
    }
}

impl PacketEncoder {
    pub fn new(depth: ColorDepth) -> Self {
        Self {
            depth,
            max_payload: layout::MAX_PAYLOAD,
        }
    }

    pub fn depth(&self) -> ColorDepth {
        self.depth
    }

    pub fn samples_per_packet(&self) -> usize {
        (self.max_payload / self.depth.record_len()).max(1)
    }

    pub fn encode_samples(&self, samples: &[Sample]) -> Vec<Vec<u8>> {
        let record_len = self.depth.record_len();
        samples
            .chunks(self.samples_per_packet())
            .map(|chunk| {
                let mut packet = Vec::with_capacity(chunk.len() * record_len);
                for sample in chunk {
                    self.encode_sample(sample, &mut packet);
                }
                packet
            })
            .collect()
    }

    /// Map and encode a frame's points.
    pub fn encode_points(&self, points: &[Point]) -> Vec<Vec<u8>> {
        let samples: Vec<Sample> = points.iter().map(map_point).collect();
        self.encode_samples(&samples)
    }

    pub fn encode_sample(&self, sample: &Sample, out: &mut Vec<u8>) {
        out.push(self.depth.type_tag());
        out.extend_from_slice(&sample.x.to_be_bytes());
        out.extend_from_slice(&sample.y.to_be_bytes());
        match self.depth {
            ColorDepth::Rgb8 => out.extend_from_slice(&[
                downscale_channel(sample.r),
                downscale_channel(sample.g),
                downscale_channel(sample.b),
            ]),
            ColorDepth::Rgb16 => {
                out.extend_from_slice(&sample.r.to_be_bytes());
                out.extend_from_slice(&sample.g.to_be_bytes());
                out.extend_from_slice(&sample.b.to_be_bytes());
            }
        }
    }
}

/// Datagram setting the controller's scan period in microseconds.
pub fn period_packet(period_us: u32) -> [u8; layout::PERIOD_LEN] {
    let mut packet = [0u8; layout::PERIOD_LEN];
    packet[0] = layout::TYPE_PERIOD;
    packet[layout::PERIOD_RANGE].copy_from_slice(&period_us.to_be_bytes());
    packet
}

/// Datagram asking the controller to stop output and clear its buffer.
pub fn turn_off_packet() -> [u8; layout::TURN_OFF_LEN] {
    [layout::TYPE_TURN_OFF]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Point, Rgb};

    fn sample(n: u16) -> Sample {
        Sample {
            x: n,
            y: n,
            r: n,
            g: n,
            b: n,
        }
    }

    #[test]
    fn rgb16_record_layout() {
        let encoder = PacketEncoder::new(ColorDepth::Rgb16);
        let mut out = Vec::new();
        encoder.encode_sample(
            &Sample {
                x: 0x0102,
                y: 0x0304,
                r: 0x0506,
                g: 0x0708,
                b: 0x090a,
            },
            &mut out,
        );
        assert_eq!(out, [3, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn rgb8_record_layout() {
        let encoder = PacketEncoder::new(ColorDepth::Rgb8);
        let mut out = Vec::new();
        encoder.encode_sample(
            &Sample {
                x: 0x8000,
                y: 0x0001,
                r: 65535,
                g: 0,
                b: 128 * 257,
            },
            &mut out,
        );
        assert_eq!(out, [2, 0x80, 0x00, 0x00, 0x01, 255, 0, 128]);
    }

    #[test]
    fn chunking_200_samples() {
        let encoder = PacketEncoder::default();
        assert_eq!(encoder.samples_per_packet(), 93);
        let samples: Vec<Sample> = (0..200).map(sample).collect();
        let packets = encoder.encode_samples(&samples);
        assert_eq!(packets.len(), 3);
        assert_eq!(packets[0].len(), 93 * 11);
        assert_eq!(packets[1].len(), 93 * 11);
        assert_eq!(packets[2].len(), 14 * 11);
        assert!(packets.iter().all(|p| p.len() <= layout::MAX_PAYLOAD));
        // Order is preserved across packet boundaries.
        assert_eq!(&packets[1][1..3], &93u16.to_be_bytes());
    }

    #[test]
    fn rgb8_packs_127_per_packet() {
        let encoder = PacketEncoder::new(ColorDepth::Rgb8);
        assert_eq!(encoder.samples_per_packet(), 127);
        let samples: Vec<Sample> = (0..128).map(sample).collect();
        let packets = encoder.encode_samples(&samples);
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].len(), 1016);
        assert_eq!(packets[1].len(), 8);
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let encoder = PacketEncoder::default();
        let samples: Vec<Sample> = (0..186).map(sample).collect();
        assert_eq!(encoder.encode_samples(&samples).len(), 2);
    }

    #[test]
    fn empty_input_has_no_packets() {
        assert!(PacketEncoder::default().encode_samples(&[]).is_empty());
        assert!(PacketEncoder::default().encode_points(&[]).is_empty());
    }

    #[test]
    fn encode_points_maps_first() {
        let point = Point {
            x: 0,
            y: 0,
            z: 0,
            status: 0x40,
            color: Rgb::WHITE,
        };
        let packets = PacketEncoder::default().encode_points(&[point]);
        assert_eq!(packets, vec![vec![3, 0x80, 0, 0x80, 0, 0, 0, 0, 0, 0, 0]]);
    }

    #[test]
    fn control_packets() {
        assert_eq!(period_packet(1000), [1, 0, 0, 0x03, 0xe8]);
        assert_eq!(turn_off_packet(), [0]);
    }
}
