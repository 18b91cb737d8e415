use super::error::IwpError;

pub struct IwpReader<'a> {
    payload: &'a [u8],
}

impl<'a> IwpReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), IwpError> {
        if self.payload.len() < needed {
            return Err(IwpError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, IwpError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(IwpError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, IwpError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(IwpError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_be(&self, range: std::ops::Range<usize>) -> Result<u32, IwpError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 4 {
            return Err(IwpError::TooShort {
                needed: 4,
                actual: bytes.len(),
            });
        }
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], IwpError> {
        self.payload.get(range.clone()).ok_or(IwpError::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    /// Reader over the record starting at `offset`.
    pub fn record_at(&self, offset: usize) -> IwpReader<'a> {
        IwpReader::new(self.payload.get(offset..).unwrap_or_default())
    }
}
