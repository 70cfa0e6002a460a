//! Localizator settings: capabilities and addressing options

use std::fmt;
use std::sync::Arc;

use crate::infrastructure::traits::{LocalizationReader, LocalizationWriter};

/// What a [`Localizator`](crate::application::services::Localizator) can do
/// and how it addresses localizations.
#[derive(Clone)]
pub struct LocalizatorSettings {
    /// Source of localization text; without it every lookup fails with `CannotRead`.
    pub reader: Option<Arc<dyn LocalizationReader>>,
    /// Sink for mutations; without it changes stay in memory.
    pub writer: Option<Arc<dyn LocalizationWriter>>,
    /// All localizations live in one resource, keyed by their id at the top level.
    pub use_single_file: bool,
    /// Keep loaded trees in memory until reloaded.
    pub enable_caching: bool,
    /// Prepended to every logical path.
    pub path_prefix: String,
}

impl Default for LocalizatorSettings {
    fn default() -> Self {
        Self {
            reader: None,
            writer: None,
            use_single_file: false,
            enable_caching: true,
            path_prefix: String::new(),
        }
    }
}

impl LocalizatorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reader(mut self, reader: impl LocalizationReader + 'static) -> Self {
        self.reader = Some(Arc::new(reader));
        self
    }

    pub fn with_writer(mut self, writer: impl LocalizationWriter + 'static) -> Self {
        self.writer = Some(Arc::new(writer));
        self
    }

    pub fn single_file(mut self, enabled: bool) -> Self {
        self.use_single_file = enabled;
        self
    }

    pub fn caching(mut self, enabled: bool) -> Self {
        self.enable_caching = enabled;
        self
    }

    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    pub fn can_read(&self) -> bool {
        self.reader.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.writer.is_some()
    }
}

impl fmt::Debug for LocalizatorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizatorSettings")
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .field("use_single_file", &self.use_single_file)
            .field("enable_caching", &self.enable_caching)
            .field("path_prefix", &self.path_prefix)
            .finish()
    }
}
