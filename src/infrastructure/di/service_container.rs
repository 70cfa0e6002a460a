//! Service container for dependency injection
//!
//! Turns loaded [`Settings`] into a ready [`Localizator`].

use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, Localizator, LocalizatorSettings};
use crate::config::Settings;
use crate::domain::set_separator;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::readers::{ConstantFileReader, FolderReader};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::writers::{ConstantFileWriter, FolderWriter};

/// Container holding settings and the I/O dependencies services are built from.
pub struct ServiceContainer {
    pub settings: Arc<Settings>,
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
        }
    }

    /// Localizator settings for the configured layout.
    ///
    /// `single_file` selects the shared-file reader/writer; otherwise one file
    /// per localization in `directory`. No writer is attached when read-only.
    pub fn localizator_settings(&self) -> InfraResult<LocalizatorSettings> {
        let settings = &self.settings;
        let mut result = LocalizatorSettings::new()
            .caching(settings.enable_caching)
            .path_prefix(settings.path_prefix.clone());

        match &settings.single_file {
            Some(file) => {
                result = result
                    .single_file(true)
                    .with_reader(ConstantFileReader::with_fs(file, self.fs.clone()));
                if !settings.read_only {
                    result = result.with_writer(ConstantFileWriter::with_fs(file, self.fs.clone()));
                }
            }
            None => {
                result = result.with_reader(FolderReader::with_fs(
                    &settings.directory,
                    &settings.file_extension,
                    self.fs.clone(),
                )?);
                if !settings.read_only {
                    result = result.with_writer(FolderWriter::with_fs(
                        &settings.directory,
                        &settings.file_extension,
                        self.fs.clone(),
                    )?);
                }
            }
        }
        Ok(result)
    }

    /// Build a localizator, applying the configured separator process-wide.
    pub fn build_localizator(&self) -> InfraResult<Localizator> {
        set_separator(self.settings.separator).map_err(ApplicationError::from)?;
        let settings = self.localizator_settings()?;
        debug!("build_localizator: {:?}", settings);
        let mut localizator = Localizator::new(settings);
        localizator.set_localization(&self.settings.default_localization);
        Ok(localizator)
    }
}
