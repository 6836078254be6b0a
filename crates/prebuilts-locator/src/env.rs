//! Environment snapshots.
//!
//! Resolution never reads the process environment directly; callers take a
//! snapshot once and pass it down, so a resolution is a pure function of the
//! snapshot (and, for optional artifacts, the filesystem).

use std::collections::BTreeMap;

/// Toolchain directory name override (e.g. `clang-r522817`).
pub const LLVM_PREBUILTS_VERSION: &str = "LLVM_PREBUILTS_VERSION";
/// Clang release version override (e.g. `18`).
pub const LLVM_RELEASE_VERSION: &str = "LLVM_RELEASE_VERSION";
/// Enables host LLVM library modules.
pub const LLVM_BUILD_HOST_TOOLS: &str = "LLVM_BUILD_HOST_TOOLS";
/// Builds sanitizer runtimes from source instead of using prebuilts.
pub const FORCE_BUILD_SANITIZER_SHARED_OBJECTS: &str = "FORCE_BUILD_SANITIZER_SHARED_OBJECTS";

/// An immutable snapshot of string-valued environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// An empty snapshot: every lookup falls back to its default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value of `key`, or `default` when unset or empty.
    pub fn get_with_default<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            Some(v) if !v.is_empty() => v,
            _ => default,
        }
    }

    /// Whether `key` holds one of the accepted truthy spellings.
    pub fn is_true(&self, key: &str) -> bool {
        matches!(self.get(key), Some("1" | "y" | "yes" | "on" | "true"))
    }
}
