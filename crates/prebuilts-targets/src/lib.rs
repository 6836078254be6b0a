//! Target model and architecture naming tables for prebuilt toolchain artifacts.
//!
//! A target is an (OS, architecture, libc variant) tuple. The set of targets
//! is fixed at compile time; the two tables in [`table`] map each target to
//! the directory and filename suffix its prebuilt runtime libraries use:
//! - **Dynamic table:** shared library naming (Android ABI names, musl triples)
//! - **Static table:** static library and object naming, plus optional
//!   darwin/windows rows that may be absent from a distribution

pub mod error;
pub mod spec;
pub mod table;

pub use error::{Result, TargetError};
pub use spec::{Arch, Os, TargetSpec};
pub use table::{ArchitectureTable, Location, TableEntry};
