//! I/O boundary traits for testability
//!
//! These traits abstract where localization text comes from and where it goes,
//! allowing the localizator to be driven by files, fixed text or memory.

use std::io;
use std::path::Path;

/// Source of raw localization text, keyed by localization id.
pub trait LocalizationReader: Send + Sync {
    /// Whether text for `localization` is available.
    fn can_read(&self, localization: &str) -> bool;

    /// Raw text for `localization`. Only called when `can_read` is true.
    fn read(&self, localization: &str) -> io::Result<String>;
}

/// Sink for raw localization text, keyed by localization id.
pub trait LocalizationWriter: Send + Sync {
    /// Whether `localization` can be persisted.
    fn can_write(&self, _localization: &str) -> bool {
        true
    }

    /// Persist the full text of `localization`.
    fn write(&self, localization: &str, text: &str) -> io::Result<()>;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
