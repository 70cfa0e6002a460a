//! Localization readers: per-localization files, one shared file, fixed text

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::trace;

use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{FileSystem, LocalizationReader, RealFileSystem};

/// Default extension of localization files.
pub const DEFAULT_EXTENSION: &str = ".json";

pub(crate) fn check_extension(extension: &str) -> InfraResult<()> {
    if extension.starts_with('.') {
        Ok(())
    } else {
        Err(InfraError::IncorrectFileExtension(extension.to_string()))
    }
}

pub(crate) fn localization_file(folder: &Path, localization: &str, extension: &str) -> PathBuf {
    folder.join(format!("{}{}", localization, extension))
}

/// Reads `<folder>/<localization><extension>`.
pub struct FolderReader {
    folder: PathBuf,
    extension: String,
    fs: Arc<dyn FileSystem>,
}

impl FolderReader {
    pub fn new(folder: impl Into<PathBuf>, extension: &str) -> InfraResult<Self> {
        Self::with_fs(folder, extension, Arc::new(RealFileSystem))
    }

    pub fn with_fs(
        folder: impl Into<PathBuf>,
        extension: &str,
        fs: Arc<dyn FileSystem>,
    ) -> InfraResult<Self> {
        check_extension(extension)?;
        Ok(Self {
            folder: folder.into(),
            extension: extension.to_string(),
            fs,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn path_for(&self, localization: &str) -> PathBuf {
        localization_file(&self.folder, localization, &self.extension)
    }
}

impl LocalizationReader for FolderReader {
    fn can_read(&self, localization: &str) -> bool {
        self.fs.is_file(&self.path_for(localization))
    }

    fn read(&self, localization: &str) -> io::Result<String> {
        let path = self.path_for(localization);
        trace!("read: {}", path.display());
        self.fs.read_to_string(&path)
    }
}

/// Reads one file for every localization (single-file layout).
pub struct ConstantFileReader {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl ConstantFileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, Arc::new(RealFileSystem))
    }

    pub fn with_fs(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalizationReader for ConstantFileReader {
    fn can_read(&self, _localization: &str) -> bool {
        self.fs.is_file(&self.path)
    }

    fn read(&self, _localization: &str) -> io::Result<String> {
        trace!("read: {}", self.path.display());
        self.fs.read_to_string(&self.path)
    }
}

/// Serves the same JSON text for every localization.
#[derive(Debug, Clone)]
pub struct TextReader {
    text: String,
}

impl TextReader {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl LocalizationReader for TextReader {
    fn can_read(&self, _localization: &str) -> bool {
        true
    }

    fn read(&self, _localization: &str) -> io::Result<String> {
        Ok(self.text.clone())
    }
}
