//! Domain layer: localization trees and lookup paths
//!
//! This layer is independent of external concerns (no I/O, no serialization, no config loading).

pub mod error;
pub mod node;
pub mod path;

pub use error::{DomainError, DomainResult};
pub use node::{AddOutcome, LocalizationNode, NodeKind};
pub use path::{separator, set_separator, LocalizationPath, ALLOWED_SEPARATORS, DEFAULT_SEPARATOR};
