mod file;

pub use file::FileSource;

use std::path::Path;

use thiserror::Error;

use crate::animation::Animation;
use crate::formats::ilda::decode;

/// Supplies the raw bytes of one animation.
pub trait AnimationSource {
    fn read_bytes(&mut self) -> Result<Vec<u8>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Animation bytes already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl AnimationSource for MemorySource {
    fn read_bytes(&mut self) -> Result<Vec<u8>, SourceError> {
        Ok(std::mem::take(&mut self.bytes))
    }
}

pub fn load_animation<S: AnimationSource>(mut source: S) -> Result<Animation, SourceError> {
    let bytes = source.read_bytes()?;
    Ok(decode(&bytes))
}

pub fn load_animation_file(path: &Path) -> Result<Animation, SourceError> {
    load_animation(FileSource::open(path)?)
}
