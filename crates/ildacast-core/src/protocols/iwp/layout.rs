pub const DEFAULT_PORT: u16 = 7200;
pub const MAX_PAYLOAD: usize = 1023;

pub const TYPE_TURN_OFF: u8 = 0x00;
pub const TYPE_PERIOD: u8 = 0x01;
pub const TYPE_POINT_RGB8: u8 = 0x02;
pub const TYPE_POINT_RGB16: u8 = 0x03;

pub const TURN_OFF_LEN: usize = 1;
pub const PERIOD_LEN: usize = 5;
pub const POINT_RGB8_LEN: usize = 8;
pub const POINT_RGB16_LEN: usize = 11;

pub const PERIOD_RANGE: std::ops::Range<usize> = 1..5;

pub const X_RANGE: std::ops::Range<usize> = 1..3;
pub const Y_RANGE: std::ops::Range<usize> = 3..5;

pub const RGB8_R_OFFSET: usize = 5;
pub const RGB8_G_OFFSET: usize = 6;
pub const RGB8_B_OFFSET: usize = 7;

pub const RGB16_R_RANGE: std::ops::Range<usize> = 5..7;
pub const RGB16_G_RANGE: std::ops::Range<usize> = 7..9;
pub const RGB16_B_RANGE: std::ops::Range<usize> = 9..11;

/// Offset added to signed ILDA coordinates to reach the unsigned range.
pub const COORDINATE_OFFSET: i32 = 0x8000;
/// Maps 0..=255 onto 0..=65535 exactly at both ends.
pub const COLOR_UPSCALE: u16 = 257;
