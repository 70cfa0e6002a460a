//! Localization writers: per-localization files or one shared file

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::infrastructure::error::InfraResult;
use crate::infrastructure::readers::{check_extension, localization_file};
use crate::infrastructure::traits::{FileSystem, LocalizationWriter, RealFileSystem};

/// Writes `<folder>/<localization><extension>`, creating the folder on demand.
pub struct FolderWriter {
    folder: PathBuf,
    extension: String,
    fs: Arc<dyn FileSystem>,
}

impl FolderWriter {
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

    pub fn path_for(&self, localization: &str) -> PathBuf {
        localization_file(&self.folder, localization, &self.extension)
    }
}

impl LocalizationWriter for FolderWriter {
    fn write(&self, localization: &str, text: &str) -> io::Result<()> {
        let path = self.path_for(localization);
        debug!("write: {}", path.display());
        self.fs.ensure_parent(&path)?;
        self.fs.write(&path, text)
    }
}

/// Writes every localization to the same file (single-file layout).
pub struct ConstantFileWriter {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl ConstantFileWriter {
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

impl LocalizationWriter for ConstantFileWriter {
    fn write(&self, _localization: &str, text: &str) -> io::Result<()> {
        debug!("write: {}", self.path.display());
        self.fs.ensure_parent(&self.path)?;
        self.fs.write(&self.path, text)
    }
}
