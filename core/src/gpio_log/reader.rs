use super::ReaderError;
use memchr::memchr2_iter;
use memmap2::Mmap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Decoded contents of one log file, indexed by line
#[derive(Debug, Clone)]
pub struct LogText {
    path: PathBuf,
    content: String,
    line_ranges: Vec<(usize, usize)>,
}

impl LogText {
    pub fn from_string(path: impl Into<PathBuf>, content: String) -> Self {
        let line_ranges = line_ranges(content.as_bytes());
        Self {
            path: path.into(),
            content,
            line_ranges,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-empty lines in file order, line terminators stripped
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.line_ranges
            .iter()
            .map(|&(start, end)| &self.content[start..end])
    }

    pub fn line_ranges(&self) -> &[(usize, usize)] {
        &self.line_ranges
    }

    pub fn line(&self, range: (usize, usize)) -> &str {
        &self.content[range.0..range.1]
    }

    pub fn line_count(&self) -> usize {
        self.line_ranges.len()
    }
}

// Splits on '\n', '\r' or "\r\n" and skips empty lines
fn line_ranges(bytes: &[u8]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for end in memchr2_iter(b'\n', b'\r', bytes) {
        if end > start {
            ranges.push((start, end));
        }
        start = end + 1;
    }
    if start < bytes.len() {
        ranges.push((start, bytes.len()));
    }
    ranges
}

pub struct Reader {
    path: PathBuf,
}

impl Reader {
    pub fn from(file_path: impl Into<PathBuf>) -> Self {
        Reader {
            path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Map the whole file and decode it. Invalid UTF-8 is replaced rather than rejected,
    /// emulator output occasionally carries stray bytes.
    pub fn read(&self) -> Result<LogText, ReaderError> {
        let file = fs::File::open(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ReaderError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                ReaderError::OpenFile {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let len = file
            .metadata()
            .map_err(|source| ReaderError::OpenFile {
                path: self.path.clone(),
                source,
            })?
            .len();
        if len == 0 {
            tracing::debug!(path = %self.path.display(), "log file is empty");
            return Ok(LogText::from_string(&self.path, String::new()));
        }

        // SAFETY: the mapping is read-only and dropped before this function returns
        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| ReaderError::MemoryMap {
            path: self.path.clone(),
            source,
        })?;
        let content = String::from_utf8_lossy(mmap.as_ref()).into_owned();
        let text = LogText::from_string(&self.path, content);

        tracing::debug!(
            path = %self.path.display(),
            bytes = len,
            lines = text.line_count(),
            "read log file"
        );
        Ok(text)
    }
}
