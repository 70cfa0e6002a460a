//! Process-wide localizator
//!
//! An optional global [`Localizator`] so callers can look strings up without
//! threading a reference around. Every function fails with
//! `SingletonNotInitialized` until [`init`] or [`init_with`] has been called.
//!
//! Access is serialized through a mutex. Calling back into this module from
//! inside [`with_localizator`] deadlocks.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::application::services::{Localizator, StringEntry};
use crate::application::settings::LocalizatorSettings;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::AddOutcome;

static LOCALIZATOR: Mutex<Option<Localizator>> = Mutex::new(None);

fn global() -> MutexGuard<'static, Option<Localizator>> {
    LOCALIZATOR.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Install a new localizator built from `settings`, replacing any previous one.
pub fn init(settings: LocalizatorSettings) {
    init_with(Localizator::new(settings));
}

/// Install an existing localizator, replacing any previous one.
pub fn init_with(localizator: Localizator) {
    info!("init: {:?}", localizator.settings());
    *global() = Some(localizator);
}

/// Remove the global localizator, returning it.
pub fn teardown() -> Option<Localizator> {
    global().take()
}

pub fn is_initialized() -> bool {
    global().is_some()
}

/// Run `op` against the global localizator.
pub fn with_localizator<T>(
    op: impl FnOnce(&mut Localizator) -> ApplicationResult<T>,
) -> ApplicationResult<T> {
    let mut guard = global();
    let localizator = guard
        .as_mut()
        .ok_or(ApplicationError::SingletonNotInitialized)?;
    op(localizator)
}

pub fn set_localization(localization: &str) -> ApplicationResult<()> {
    with_localizator(|loc| {
        loc.set_localization(localization);
        Ok(())
    })
}

pub fn current_localization() -> ApplicationResult<String> {
    with_localizator(|loc| Ok(loc.current_localization().to_string()))
}

pub fn get(path: &str) -> ApplicationResult<String> {
    with_localizator(|loc| loc.get_string(path))
}

pub fn get_for(localization: &str, path: &str) -> ApplicationResult<String> {
    with_localizator(|loc| loc.get_string_for(localization, path))
}

/// Lookup that only fails when no localizator is installed.
pub fn get_or(path: &str, fallback: &str) -> ApplicationResult<String> {
    with_localizator(|loc| Ok(loc.get_string_or(path, fallback)))
}

pub fn get_or_for(localization: &str, path: &str, fallback: &str) -> ApplicationResult<String> {
    with_localizator(|loc| Ok(loc.get_string_or_for(localization, path, fallback)))
}

pub fn get_formatted(path: &str, args: &[(&str, &str)]) -> ApplicationResult<String> {
    with_localizator(|loc| loc.get_formatted(path, args))
}

pub fn get_formatted_for(
    localization: &str,
    path: &str,
    args: &[(&str, &str)],
) -> ApplicationResult<String> {
    with_localizator(|loc| loc.get_formatted_for(localization, path, args))
}

pub fn get_init(path: &str, init_value: &str) -> ApplicationResult<String> {
    with_localizator(|loc| loc.get_string_init(path, init_value))
}

pub fn get_init_for(localization: &str, path: &str, init_value: &str) -> ApplicationResult<String> {
    with_localizator(|loc| loc.get_string_init_for(localization, path, init_value))
}

pub fn get_array(path: &str) -> ApplicationResult<Vec<String>> {
    with_localizator(|loc| loc.get_array(path))
}

pub fn get_array_for(localization: &str, path: &str) -> ApplicationResult<Vec<String>> {
    with_localizator(|loc| loc.get_array_for(localization, path))
}

pub fn get_array_element(path: &str, index: usize) -> ApplicationResult<String> {
    with_localizator(|loc| loc.get_array_element(path, index))
}

pub fn get_array_element_for(localization: &str, path: &str, index: usize) -> ApplicationResult<String> {
    with_localizator(|loc| loc.get_array_element_for(localization, path, index))
}

pub fn add_string(category_path: &str, name: &str, value: &str) -> ApplicationResult<AddOutcome> {
    with_localizator(|loc| loc.add_string(category_path, name, value))
}

pub fn add_string_for(
    localization: &str,
    category_path: &str,
    name: &str,
    value: &str,
) -> ApplicationResult<AddOutcome> {
    with_localizator(|loc| loc.add_string_for(localization, category_path, name, value))
}

pub fn add_category(category_path: &str, name: &str) -> ApplicationResult<AddOutcome> {
    with_localizator(|loc| loc.add_category(category_path, name))
}

pub fn add_category_for(localization: &str, category_path: &str, name: &str) -> ApplicationResult<AddOutcome> {
    with_localizator(|loc| loc.add_category_for(localization, category_path, name))
}

pub fn add_strings(category_path: &str, entries: &[StringEntry]) -> ApplicationResult<bool> {
    with_localizator(|loc| loc.add_strings(category_path, entries))
}

pub fn add_strings_for(
    localization: &str,
    category_path: &str,
    entries: &[StringEntry],
) -> ApplicationResult<bool> {
    with_localizator(|loc| loc.add_strings_for(localization, category_path, entries))
}

pub fn add_categories<S: AsRef<str>>(category_path: &str, names: &[S]) -> ApplicationResult<bool> {
    with_localizator(|loc| loc.add_categories(category_path, names))
}

pub fn add_categories_for<S: AsRef<str>>(
    localization: &str,
    category_path: &str,
    names: &[S],
) -> ApplicationResult<bool> {
    with_localizator(|loc| loc.add_categories_for(localization, category_path, names))
}
