use thiserror::Error;

/// Errors returned by IWP datagram parsing.
///
/// # Examples
/// ```
/// use ildacast_core::protocols::iwp::error::IwpError;
///
/// let err = IwpError::UnknownType { tag: 7, offset: 0 };
/// assert!(err.to_string().contains("unknown record type"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IwpError {
    #[error("datagram too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unknown record type {tag:#04x} at offset {offset}")]
    UnknownType { tag: u8, offset: usize },
}
