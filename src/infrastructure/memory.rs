//! In-memory localization storage
//!
//! Implements both reader and writer over a shared map, so a clone handed to a
//! localizator observes (and can inspect) everything written through it.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, PoisonError, RwLock};

use crate::infrastructure::traits::{LocalizationReader, LocalizationWriter};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    texts: Arc<RwLock<BTreeMap<String, String>>>,
    read_only: Vec<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(self, localization: &str, text: &str) -> Self {
        self.insert(localization, text);
        self
    }

    /// Refuse writes for `localization`.
    pub fn with_read_only(mut self, localization: &str) -> Self {
        self.read_only.push(localization.to_string());
        self
    }

    pub fn insert(&self, localization: &str, text: &str) {
        self.texts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(localization.to_string(), text.to_string());
    }

    pub fn get(&self, localization: &str) -> Option<String> {
        self.texts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(localization)
            .cloned()
    }
}

impl LocalizationReader for MemoryStorage {
    fn can_read(&self, localization: &str) -> bool {
        self.get(localization).is_some()
    }

    fn read(&self, localization: &str) -> io::Result<String> {
        self.get(localization).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no text stored for localization {}", localization),
            )
        })
    }
}

impl LocalizationWriter for MemoryStorage {
    fn can_write(&self, localization: &str) -> bool {
        !self.read_only.iter().any(|l| l == localization)
    }

    fn write(&self, localization: &str, text: &str) -> io::Result<()> {
        self.insert(localization, text);
        Ok(())
    }
}
