pub const MAGIC: &[u8; 4] = b"ILDA";
pub const HEADER_LEN: usize = 32;

pub const MAGIC_RANGE: std::ops::Range<usize> = 0..4;
pub const FORMAT_OFFSET: usize = 7;
pub const FRAME_NAME_RANGE: std::ops::Range<usize> = 8..16;
pub const COMPANY_NAME_RANGE: std::ops::Range<usize> = 16..24;
pub const RECORDS_RANGE: std::ops::Range<usize> = 24..26;
pub const FRAME_INDEX_RANGE: std::ops::Range<usize> = 26..28;
pub const TOTAL_FRAMES_RANGE: std::ops::Range<usize> = 28..30;
pub const PROJECTOR_OFFSET: usize = 30;
pub const NAME_LEN: usize = 8;

pub const FORMAT_INDEXED_3D: u8 = 0;
pub const FORMAT_INDEXED_2D: u8 = 1;
pub const FORMAT_PALETTE: u8 = 2;
pub const FORMAT_TRUE_COLOR_3D: u8 = 4;
pub const FORMAT_TRUE_COLOR_2D: u8 = 5;

pub const INDEXED_3D_RECORD_LEN: usize = 8;
pub const INDEXED_2D_RECORD_LEN: usize = 6;
pub const PALETTE_RECORD_LEN: usize = 3;
pub const TRUE_COLOR_3D_RECORD_LEN: usize = 10;
pub const TRUE_COLOR_2D_RECORD_LEN: usize = 8;

// Point records: x, y (and z for 3D) as big-endian i16, then status.
pub const X_RANGE: std::ops::Range<usize> = 0..2;
pub const Y_RANGE: std::ops::Range<usize> = 2..4;
pub const Z_RANGE: std::ops::Range<usize> = 4..6;
pub const STATUS_OFFSET_2D: usize = 4;
pub const STATUS_OFFSET_3D: usize = 6;

pub const STATUS_BLANKED_MASK: u8 = 0b0100_0000;
pub const PALETTE_SIZE: usize = 256;
