//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements the reader/writer boundary traits and wires up services.

pub mod di;
pub mod error;
pub mod memory;
pub mod readers;
pub mod traits;
pub mod writers;

pub use di::ServiceContainer;
pub use error::{InfraError, InfraResult};
pub use memory::MemoryStorage;
pub use readers::{ConstantFileReader, FolderReader, TextReader, DEFAULT_EXTENSION};
pub use traits::{FileSystem, LocalizationReader, LocalizationWriter, RealFileSystem};
pub use writers::{ConstantFileWriter, FolderWriter};
