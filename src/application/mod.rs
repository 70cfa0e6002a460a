//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod codec;
pub mod error;
pub mod error_ext;
pub mod facade;
pub mod localized;
pub mod services;
pub mod settings;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use localized::{LocalizedString, LocalizedValue};
pub use services::{Localizator, StringEntry, DEFAULT_LOCALIZATION};
pub use settings::LocalizatorSettings;
