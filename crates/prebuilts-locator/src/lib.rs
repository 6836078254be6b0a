//! Resolves where prebuilt LLVM toolchain artifacts live.
//!
//! For a module of a registered type, the locator computes one descriptor per
//! supported target and folds them into a typed property bag for the host
//! build system.
//!
//! # Flow
//!
//! ```text
//! Environment ──► VersionResolver ──► ToolchainRelease
//!                                          │
//!                                     PathBuilder
//!                                          │
//! ArchitectureTable (dynamic | static) ──► describe ──► DescriptorSet
//!                                                            │
//!                                   ModuleProperties ──► PropertySink
//! ```
//!
//! Every step is a pure function of the environment snapshot, except the
//! existence probe for optional darwin/windows artifacts.

pub mod config;
pub mod describe;
pub mod descriptor;
pub mod emit;
pub mod env;
pub mod error;
pub mod locator;
pub mod module_type;
pub mod names;
pub mod paths;
pub mod probe;
pub mod properties;
pub mod registry;
pub mod release;

// Re-exports for convenience.
pub use config::{LocatorConfig, ModuleEntry, ModuleManifest, CONFIG_FILE};
pub use descriptor::{ArtifactDescriptor, ArtifactExtra, ArtifactKind, DescriptorSet, Stubs};
pub use emit::{CollectingSink, JsonSink, PropertySink};
pub use env::Environment;
pub use error::{LocatorError, Result};
pub use locator::Locator;
pub use module_type::ModuleType;
pub use paths::PathBuilder;
pub use probe::{FileProbe, FsProbe, StaticProbe};
pub use properties::{ModuleProperties, TargetProperties};
pub use registry::Registry;
pub use release::{ToolchainRelease, VersionResolver};
