//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (LocalizationReader, LocalizationWriter)
//! but are themselves concrete structs, not traits.

mod localizator;

pub use localizator::{Localizator, StringEntry, DEFAULT_LOCALIZATION};
