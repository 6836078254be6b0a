//! Filesystem probing for optional artifacts.
//!
//! Darwin and windows runtimes are not present in every distribution. Before
//! describing one, the locator asks a [`FileProbe`] whether it exists; a
//! missing optional artifact is skipped rather than reported.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Answers whether a toolchain-relative path exists.
pub trait FileProbe {
    fn exists(&self, path: &str) -> bool;
}

/// Probes the real filesystem relative to a module directory.
#[derive(Debug, Clone)]
pub struct FsProbe {
    module_dir: PathBuf,
}

impl FsProbe {
    pub fn new(module_dir: impl Into<PathBuf>) -> Self {
        Self {
            module_dir: module_dir.into(),
        }
    }

    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }
}

impl FileProbe for FsProbe {
    fn exists(&self, path: &str) -> bool {
        self.module_dir.join(path).exists()
    }
}

/// A fixed set of existing paths.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    present: BTreeSet<String>,
}

impl StaticProbe {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// A probe that reports nothing as present.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl FileProbe for StaticProbe {
    fn exists(&self, path: &str) -> bool {
        self.present.contains(path)
    }
}

impl<P: FileProbe + ?Sized> FileProbe for &P {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_probe_resolves_against_module_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("clang-r1/lib")).unwrap();
        std::fs::write(dir.path().join("clang-r1/lib/libc++.dylib"), b"").unwrap();

        let probe = FsProbe::new(dir.path());
        assert!(probe.exists("clang-r1/lib/libc++.dylib"));
        assert!(!probe.exists("clang-r1/lib/libc++abi.dylib"));
    }

    #[test]
    fn static_probe() {
        let probe = StaticProbe::new(["a/b.a"]);
        assert!(probe.exists("a/b.a"));
        assert!(!probe.exists("a/c.a"));
        assert!(!StaticProbe::empty().exists("a/b.a"));
    }
}
