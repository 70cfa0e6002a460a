//! Error conversion helpers for collaborator I/O
//!
//! Provides an extension trait for attaching localization context to I/O errors.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add localization context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// reader.read("eng")
    ///     .with_localization_context("read", "eng")?;
    /// ```
    fn with_localization_context(self, action: &str, localization: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_localization_context(self, action: &str, localization: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{} localization \"{}\"", action, localization),
            source: Box::new(e),
        })
    }
}
