use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{AnimationSource, SourceError};

/// Animation read from a file on disk.
///
/// The file is opened eagerly so a missing or unreadable path fails at
/// `open`, before any decoding.
pub struct FileSource {
    path: PathBuf,
    file: File,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnimationSource for FileSource {
    fn read_bytes(&mut self) -> Result<Vec<u8>, SourceError> {
        let mut bytes = Vec::new();
        self.file.read_to_end(&mut bytes)?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "animation loaded");
        Ok(bytes)
    }
}
