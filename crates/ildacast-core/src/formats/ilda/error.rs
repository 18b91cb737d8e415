use thiserror::Error;

/// Reasons a header or record read stops.
///
/// The section scan turns every one of these into a `ScanEnd`; they never
/// escape `decode`.
///
/// # Examples
/// ```
/// use ildacast_core::formats::ilda::error::IldaError;
///
/// let err = IldaError::UnknownFormat { code: 9 };
/// assert!(err.to_string().contains("unknown format code"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IldaError {
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("missing ILDA magic")]
    BadMagic,
    #[error("unknown format code: {code}")]
    UnknownFormat { code: u8 },
}
