//! Values looked up lazily by path

use std::fmt;

use crate::application::facade;
use crate::application::services::Localizator;
use crate::application::ApplicationResult;

/// A logical path plus a converter from the localized text to `T`.
///
/// Missing entries resolve to the path text itself, so a forgotten
/// translation shows up as `menu.quit` rather than as an error.
pub struct LocalizedValue<T> {
    path: String,
    convert: Box<dyn Fn(&str) -> T + Send + Sync>,
}

/// The plain-text case.
pub type LocalizedString = LocalizedValue<String>;

impl<T> LocalizedValue<T> {
    pub fn new(path: impl Into<String>, convert: impl Fn(&str) -> T + Send + Sync + 'static) -> Self {
        Self {
            path: path.into(),
            convert: Box::new(convert),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resolve against `localizator` in its current localization.
    pub fn resolve(&self, localizator: &mut Localizator) -> T {
        let text = localizator.get_string_or(&self.path, &self.path);
        (self.convert)(&text)
    }

    /// Resolve against the global localizator.
    pub fn resolve_global(&self) -> ApplicationResult<T> {
        let text = facade::get_or(&self.path, &self.path)?;
        Ok((self.convert)(&text))
    }
}

impl LocalizedValue<String> {
    pub fn text(path: impl Into<String>) -> Self {
        Self::new(path, str::to_string)
    }
}

impl<T> fmt::Debug for LocalizedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizedValue")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Renders through the global localizator; without one, the path is shown.
impl<T: fmt::Display> fmt::Display for LocalizedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolve_global() {
            Ok(value) => value.fmt(f),
            Err(_) => f.write_str(&self.path),
        }
    }
}
