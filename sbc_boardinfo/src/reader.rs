//! Raw data collectors for the OS text sources.
//!
//! Each collector owns an overridable path and extracts one value:
//! - [`BoardModelReader`] - device-tree model string
//! - [`CpuInfoReader`] - `Revision` value from the CPU information file
//! - [`MemInfoReader`] - `MemTotal:` line from the memory information file
//!
//! Collectors never panic. Failures are logged with the path and cause and
//! returned as [`ReadError`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};

use sbc_common::consts::{DEFAULT_CPU_INFO_PATH, DEFAULT_DEVICE_MODEL_PATH, DEFAULT_MEM_INFO_PATH};

/// Message used when no `Revision` line is present.
pub const CPU_REVISION_NOT_FOUND: &str = "CPU revision not found in file";

/// Message used when no `MemTotal:` line is present.
pub const MEM_TOTAL_NOT_FOUND: &str = "MemTotal entry not found in memory information file";

/// Collector error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The source could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// The source was read but the expected entry is absent.
    #[error("{0}")]
    NotFound(String),
}

/// A single-value extractor over one text file.
pub trait DataReader {
    /// Path the collector reads from.
    fn path(&self) -> &Path;

    /// Read and extract the value.
    fn read(&self) -> Result<String, ReadError>;
}

fn read_source(path: &Path) -> Result<String, ReadError> {
    fs::read_to_string(path).map_err(|e| {
        error!("Failed to read {}: {}", path.display(), e);
        ReadError::Io(e.to_string())
    })
}

// ─── BoardModelReader ───────────────────────────────────────────────

/// Reads the device-tree model string.
///
/// Lines are concatenated and trimmed; NUL terminators are dropped.
/// A missing file yields an empty string.
#[derive(Debug, Clone)]
pub struct BoardModelReader {
    path: PathBuf,
}

impl BoardModelReader {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_DEVICE_MODEL_PATH)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for BoardModelReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataReader for BoardModelReader {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, ReadError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No board model at {}", self.path.display());
                return Ok(String::new());
            }
            Err(e) => {
                error!("Failed to read board model from {}: {}", self.path.display(), e);
                return Err(ReadError::Io(e.to_string()));
            }
        };

        let text = String::from_utf8_lossy(&bytes);
        let model: String = text.lines().collect::<String>().replace('\0', "");
        Ok(model.trim().to_string())
    }
}

// ─── CpuInfoReader ──────────────────────────────────────────────────

/// Reads the hardware revision code from the CPU information file.
#[derive(Debug, Clone)]
pub struct CpuInfoReader {
    path: PathBuf,
}

impl CpuInfoReader {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_CPU_INFO_PATH)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for CpuInfoReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataReader for CpuInfoReader {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, ReadError> {
        let content = read_source(&self.path)?;
        let revision = content
            .lines()
            .find(|line| line.starts_with("Revision"))
            .and_then(|line| line.split_once(':'))
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty());

        match revision {
            Some(value) => Ok(value.to_string()),
            None => {
                error!("{} ({})", CPU_REVISION_NOT_FOUND, self.path.display());
                Err(ReadError::NotFound(CPU_REVISION_NOT_FOUND.to_string()))
            }
        }
    }
}

// ─── MemInfoReader ──────────────────────────────────────────────────

/// Reads the `MemTotal:` line from the memory information file.
#[derive(Debug, Clone)]
pub struct MemInfoReader {
    path: PathBuf,
}

impl MemInfoReader {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_MEM_INFO_PATH)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for MemInfoReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataReader for MemInfoReader {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, ReadError> {
        let content = read_source(&self.path)?;
        match content.lines().find(|line| line.starts_with("MemTotal:")) {
            Some(line) => Ok(line.trim().to_string()),
            None => {
                error!("{} ({})", MEM_TOTAL_NOT_FOUND, self.path.display());
                Err(ReadError::NotFound(MEM_TOTAL_NOT_FOUND.to_string()))
            }
        }
    }
}

/// Parse the kB figure out of a `MemTotal:` line, e.g.
/// `"MemTotal:        3884376 kB"` → `3884376`.
pub fn parse_mem_total_kb(line: &str) -> Option<u64> {
    line.strip_prefix("MemTotal:")?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fixture(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn model_is_concatenated_and_trimmed() {
        let file = fixture(b"  Raspberry Pi 4 Model B\n Rev 1.4\0\n");
        let model = BoardModelReader::with_path(file.path()).read().unwrap();
        assert_eq!(model, "Raspberry Pi 4 Model B Rev 1.4");
    }

    #[test]
    fn model_whitespace_only_is_empty() {
        let file = fixture(b"   \n\t\n");
        assert_eq!(BoardModelReader::with_path(file.path()).read().unwrap(), "");
    }

    #[test]
    fn model_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let reader = BoardModelReader::with_path(dir.path().join("model"));
        assert_eq!(reader.read().unwrap(), "");
    }

    #[test]
    fn model_unreadable_path_is_io_error() {
        // A directory cannot be read as a file.
        let dir = tempfile::tempdir().unwrap();
        let reader = BoardModelReader::with_path(dir.path());
        assert!(matches!(reader.read(), Err(ReadError::Io(_))));
    }

    #[test]
    fn cpu_revision_found() {
        let file = fixture(
            b"processor\t: 0\nBogoMIPS\t: 108.00\nHardware\t: BCM2835\nRevision\t: d04170\nSerial\t\t: 0000000012345678\n",
        );
        assert_eq!(CpuInfoReader::with_path(file.path()).read().unwrap(), "d04170");
    }

    #[test]
    fn cpu_revision_first_line_wins() {
        let file = fixture(b"Revision : a03111\nRevision : c03112\n");
        assert_eq!(CpuInfoReader::with_path(file.path()).read().unwrap(), "a03111");
    }

    #[test]
    fn cpu_revision_missing() {
        let file = fixture(b"processor\t: 0\nmodel name\t: x86\n");
        let err = CpuInfoReader::with_path(file.path()).read().unwrap_err();
        assert_eq!(err, ReadError::NotFound(CPU_REVISION_NOT_FOUND.to_string()));
        assert_eq!(err.to_string(), "CPU revision not found in file");
    }

    #[test]
    fn cpu_revision_empty_value() {
        let file = fixture(b"Revision\t:   \n");
        assert!(matches!(
            CpuInfoReader::with_path(file.path()).read(),
            Err(ReadError::NotFound(_))
        ));
    }

    #[test]
    fn cpu_info_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let reader = CpuInfoReader::with_path(dir.path().join("cpuinfo"));
        assert!(matches!(reader.read(), Err(ReadError::Io(_))));
    }

    #[test]
    fn mem_total_line() {
        let file = fixture(b"MemTotal:        3884376 kB\nMemFree:         1234567 kB\n");
        let line = MemInfoReader::with_path(file.path()).read().unwrap();
        assert_eq!(line, "MemTotal:        3884376 kB");
        assert_eq!(parse_mem_total_kb(&line), Some(3_884_376));
    }

    #[test]
    fn mem_total_missing() {
        let file = fixture(b"MemFree:         1234567 kB\n");
        let err = MemInfoReader::with_path(file.path()).read().unwrap_err();
        assert_eq!(err, ReadError::NotFound(MEM_TOTAL_NOT_FOUND.to_string()));
    }

    #[test]
    fn parse_mem_total_rejects_garbage() {
        assert_eq!(parse_mem_total_kb("MemFree: 12 kB"), None);
        assert_eq!(parse_mem_total_kb("MemTotal: lots"), None);
        assert_eq!(parse_mem_total_kb("MemTotal:"), None);
    }

    #[test]
    fn default_paths() {
        assert_eq!(CpuInfoReader::new().path(), Path::new("/proc/cpuinfo"));
        assert_eq!(MemInfoReader::new().path(), Path::new("/proc/meminfo"));
        assert_eq!(
            BoardModelReader::new().path(),
            Path::new("/proc/device-tree/model")
        );
    }
}
