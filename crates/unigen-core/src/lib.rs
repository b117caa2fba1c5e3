//! unigen Core - generator registry and execution engine
//!
//! Resolves a generator by name, validates its configuration and options,
//! and produces or transforms TypeScript files through [`unigen_ast`]:
//! - Producers render a template into a new file and optionally register
//!   the declaration in a barrel or module descriptor
//! - Transformers append a method to a class in an existing file
//! - Composites run several generators in order with derived options
//!
//! All file access goes through the [`FileSystem`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use unigen_core::{Configuration, GeneratorRegistry, LocalFileSystem, OptionBag};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Configuration::from_value(serde_json::json!({
//!     "sourcePath": "/proj/src",
//!     "clientManagersPath": "managers",
//!     "clientManagerSpecPath": "spec/manager",
//!     "clientInternalEventsModulePath": "events/internal",
//! }))?;
//! let mut registry = GeneratorRegistry::new(config, Arc::new(LocalFileSystem));
//! registry.register_all(unigen_core::builtin::all().into_iter().take(1))?;
//!
//! let report = registry.run("cm", OptionBag::new().with("name", "lobby")).await?;
//! println!("Wrote {:?}", report.written);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod aggregation;
pub mod builtin;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod find_up;
pub mod fs;
pub mod generator;
pub mod naming;
pub mod paths;
pub mod registry;

// Re-exports for convenience
pub use config::{Configuration, OptionBag, ROOT_KEY};
pub use descriptor::{
    AggregationSpec, CompositeSpec, CompositeStep, GeneratorDescriptor, GeneratorKind, Overwrite,
    PathSegment, ProducerSpec, TargetSpec, TemplateSpec, TransformerSpec,
};
pub use error::{ErrorKind, GeneratorError, Result};
pub use find_up::{find_up, FindUp};
pub use fs::{FileSystem, LocalFileSystem, MemoryFileSystem};
pub use generator::{GenerationReport, Generator, GeneratorState};
pub use naming::{Case, NameTemplate};
pub use paths::{relative_module_reference, PathResolver};
pub use registry::GeneratorRegistry;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running generators
    pub use crate::{
        Configuration, FileSystem, GenerationReport, Generator, GeneratorError,
        GeneratorRegistry, LocalFileSystem, MemoryFileSystem, OptionBag,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
