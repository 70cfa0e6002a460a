//! Path-addressed localization trees
//!
//! Strings live in nested categories and are looked up by separator-delimited
//! paths such as `menu.file.open`. A [`Localizator`] loads trees lazily through
//! a [`LocalizationReader`], caches them, persists mutations through a
//! [`LocalizationWriter`] and can merge or compare two localizations.
//!
//! Layers, innermost first:
//! - [`domain`]: paths, nodes and tree algorithms
//! - [`application`]: the localizator service, JSON codec and global facade
//! - [`infrastructure`]: file and memory readers/writers, service wiring
//! - [`cli`]: the `localizator` command line

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{
    facade, ApplicationError, ApplicationResult, Localizator, LocalizatorSettings,
    LocalizedString, LocalizedValue, StringEntry,
};
pub use domain::{AddOutcome, DomainError, LocalizationNode, LocalizationPath, NodeKind};
pub use infrastructure::{LocalizationReader, LocalizationWriter};
