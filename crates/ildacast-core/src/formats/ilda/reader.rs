use super::error::IldaError;
use super::layout;

pub struct IldaReader<'a> {
    bytes: &'a [u8],
}

impl<'a> IldaReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), IldaError> {
        if self.bytes.len() < needed {
            return Err(IldaError::TooShort {
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, IldaError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(IldaError::TooShort {
                needed: offset + 1,
                actual: self.bytes.len(),
            })
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, IldaError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(IldaError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i16_be(&self, range: std::ops::Range<usize>) -> Result<i16, IldaError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(IldaError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(i16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], IldaError> {
        self.bytes.get(range.clone()).ok_or(IldaError::TooShort {
            needed: range.end,
            actual: self.bytes.len(),
        })
    }

    pub fn read_magic(&self) -> Result<&'a [u8], IldaError> {
        self.read_slice(layout::MAGIC_RANGE)
    }

    /// Read a fixed-width name field.
    ///
    /// Trailing NUL padding is stripped and bytes that are not valid UTF-8
    /// are dropped instead of failing the header.
    pub fn read_name(&self, range: std::ops::Range<usize>) -> Result<String, IldaError> {
        let bytes = self.read_slice(range)?;
        let end = bytes
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |last| last + 1);
        let mut name = String::with_capacity(end);
        for chunk in bytes[..end].utf8_chunks() {
            name.push_str(chunk.valid());
        }
        Ok(name)
    }
}
