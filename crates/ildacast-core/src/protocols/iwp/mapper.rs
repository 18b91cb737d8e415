use super::layout;
use crate::animation::Point;

/// A point in IWP units: unsigned 16-bit coordinates and color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub x: u16,
    pub y: u16,
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

/// Convert a decoded point into an IWP sample.
///
/// The Y axis is inverted for the controller, then both axes are shifted
/// from the signed into the unsigned 16-bit range. Blanked points always
/// come out black.
///
/// # Examples
/// ```
/// use ildacast_core::{Point, Rgb, map_point};
///
/// let point = Point { x: 0, y: 0, z: 0, status: 0, color: Rgb::new(255, 0, 128) };
/// let sample = map_point(&point);
/// assert_eq!((sample.x, sample.y), (32768, 32768));
/// assert_eq!((sample.r, sample.g, sample.b), (65535, 0, 128 * 257));
/// ```
pub fn map_point(point: &Point) -> Sample {
    let (x, y) = map_coordinates(point.x, point.y);
    if point.is_blanked() {
        return Sample {
            x,
            y,
            r: 0,
            g: 0,
            b: 0,
        };
    }
    Sample {
        x,
        y,
        r: upscale_channel(point.color.r),
        g: upscale_channel(point.color.g),
        b: upscale_channel(point.color.b),
    }
}

pub fn map_coordinates(x: i16, y: i16) -> (u16, u16) {
    (
        wrap_u16(i32::from(x) + layout::COORDINATE_OFFSET),
        wrap_u16(-i32::from(y) + layout::COORDINATE_OFFSET),
    )
}

pub fn upscale_channel(channel: u8) -> u16 {
    u16::from(channel) * layout::COLOR_UPSCALE
}

/// Inverse of [`upscale_channel`] for channels produced by it.
pub fn downscale_channel(channel: u16) -> u8 {
    (channel >> 8) as u8
}

fn wrap_u16(value: i32) -> u16 {
    value.rem_euclid(0x1_0000) as u16
}
