//! Architecture naming tables.
//!
//! Linker search paths in consumers depend on exact filename matches, so the
//! rows below are data, not derived logic. Each row says which directory of
//! the toolchain a target's runtime lives in and which suffix compiler-rt
//! appends to the library name for that target.
//!
//! ```text
//! <name><suffix>.<ext>      e.g. libclang_rt.asan-aarch64-android.so
//! ```
//!
//! Non-runtime static libraries keep their plain name and live in one
//! subdirectory of the resource directory per Android architecture.

use serde::Serialize;

use crate::error::{Result, TargetError};
use crate::spec::TargetSpec;

/// Directory family a table row resolves into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "dir")]
pub enum Location {
    /// The clang resource directory (`lib/clang/<ver>/lib/linux`).
    ResourceDir,
    /// A per-architecture subdirectory of the resource directory.
    ResourceSubdir(&'static str),
    /// A musl sysroot runtime directory keyed by its target triple.
    Musl(&'static str),
    /// The darwin runtime directory (`lib/clang/<ver>/lib/darwin`).
    Darwin,
    /// The windows runtime directory (`lib/clang/<ver>/lib/windows`).
    Windows,
}

/// One row of an architecture table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableEntry {
    pub target: TargetSpec,
    pub location: Location,
    /// Appended to the library name before the file extension.
    pub suffix: &'static str,
    /// Row may be missing from a distribution; callers probe before use.
    pub optional: bool,
}

const fn row(target: TargetSpec, location: Location, suffix: &'static str) -> TableEntry {
    TableEntry {
        target,
        location,
        suffix,
        optional: false,
    }
}

const fn optional_row(target: TargetSpec, location: Location, suffix: &'static str) -> TableEntry {
    TableEntry {
        target,
        location,
        suffix,
        optional: true,
    }
}

const DYNAMIC_ROWS: [TableEntry; 13] = [
    row(TargetSpec::ANDROID_ARM, Location::ResourceDir, "-arm-android"),
    row(TargetSpec::ANDROID_ARM64, Location::ResourceDir, "-aarch64-android"),
    row(TargetSpec::ANDROID_RISCV64, Location::ResourceDir, "-riscv64-android"),
    row(TargetSpec::ANDROID_X86, Location::ResourceDir, "-i686-android"),
    row(TargetSpec::ANDROID_X86_64, Location::ResourceDir, "-x86_64-android"),
    row(TargetSpec::LINUX_BIONIC_ARM64, Location::ResourceDir, "-aarch64-android"),
    row(TargetSpec::LINUX_BIONIC_X86_64, Location::ResourceDir, "-x86_64-android"),
    row(TargetSpec::GLIBC_X86, Location::ResourceDir, "-i386"),
    row(TargetSpec::GLIBC_X86_64, Location::ResourceDir, "-x86_64"),
    row(TargetSpec::LINUX_MUSL_X86, Location::Musl("i686-unknown-linux-musl"), "-i386"),
    row(TargetSpec::LINUX_MUSL_X86_64, Location::Musl("x86_64-unknown-linux-musl"), "-x86_64"),
    row(TargetSpec::LINUX_MUSL_ARM, Location::Musl("arm-unknown-linux-musleabihf"), "-armhf"),
    row(TargetSpec::LINUX_MUSL_ARM64, Location::Musl("aarch64-unknown-linux-musl"), "-aarch64"),
];

const STATIC_ROWS: [TableEntry; 15] = [
    row(TargetSpec::ANDROID_ARM, Location::ResourceDir, "-arm-android"),
    row(TargetSpec::ANDROID_ARM64, Location::ResourceDir, "-aarch64-android"),
    row(TargetSpec::ANDROID_RISCV64, Location::ResourceDir, "-riscv64-android"),
    row(TargetSpec::ANDROID_X86, Location::ResourceDir, "-i686-android"),
    row(TargetSpec::ANDROID_X86_64, Location::ResourceDir, "-x86_64-android"),
    row(TargetSpec::LINUX_BIONIC_ARM64, Location::ResourceDir, "-aarch64-android"),
    row(TargetSpec::LINUX_BIONIC_X86_64, Location::ResourceDir, "-x86_64-android"),
    row(TargetSpec::GLIBC_X86, Location::ResourceDir, "-i386"),
    row(TargetSpec::GLIBC_X86_64, Location::ResourceDir, "-x86_64"),
    row(TargetSpec::LINUX_MUSL_X86, Location::Musl("i686-unknown-linux-musl"), "-i386"),
    row(TargetSpec::LINUX_MUSL_X86_64, Location::Musl("x86_64-unknown-linux-musl"), "-x86_64"),
    row(TargetSpec::LINUX_MUSL_ARM, Location::Musl("arm-unknown-linux-musleabihf"), "-arm"),
    row(TargetSpec::LINUX_MUSL_ARM64, Location::Musl("aarch64-unknown-linux-musl"), "-aarch64"),
    optional_row(TargetSpec::DARWIN_X86_64, Location::Darwin, "_osx"),
    optional_row(TargetSpec::WINDOWS_X86_64, Location::Windows, "-x86_64"),
];

const PER_ARCH_ROWS: [TableEntry; 5] = [
    row(TargetSpec::ANDROID_ARM, Location::ResourceSubdir("arm"), ""),
    row(TargetSpec::ANDROID_ARM64, Location::ResourceSubdir("aarch64"), ""),
    row(TargetSpec::ANDROID_RISCV64, Location::ResourceSubdir("riscv64"), ""),
    row(TargetSpec::ANDROID_X86, Location::ResourceSubdir("i386"), ""),
    row(TargetSpec::ANDROID_X86_64, Location::ResourceSubdir("x86_64"), ""),
];

/// A fixed mapping from targets to runtime naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchitectureTable {
    name: &'static str,
    rows: &'static [TableEntry],
}

impl ArchitectureTable {
    /// Naming used for shared runtime libraries.
    pub const DYNAMIC: Self = Self {
        name: "dynamic",
        rows: &DYNAMIC_ROWS,
    };

    /// Naming used for static runtime libraries and objects.
    pub const STATIC: Self = Self {
        name: "static",
        rows: &STATIC_ROWS,
    };

    /// Android-only layout of non-runtime static libraries.
    pub const PER_ARCH: Self = Self {
        name: "per-arch",
        rows: &PER_ARCH_ROWS,
    };

    /// Every table, in listing order.
    pub const ALL: [Self; 3] = [Self::DYNAMIC, Self::STATIC, Self::PER_ARCH];

    /// Look a table up by name (`dynamic`/`shared`, `static`, or `per-arch`).
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "dynamic" | "shared" => Some(Self::DYNAMIC),
            "static" | "object" => Some(Self::STATIC),
            "per-arch" | "android" => Some(Self::PER_ARCH),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All rows, in a stable order.
    pub fn entries(&self) -> &'static [TableEntry] {
        self.rows
    }

    /// Rows that every distribution must carry.
    pub fn required_entries(&self) -> impl Iterator<Item = &'static TableEntry> {
        self.rows.iter().filter(|e| !e.optional)
    }

    /// The row for `target`, if the table covers it.
    pub fn entry(&self, target: &TargetSpec) -> Result<&'static TableEntry> {
        self.rows
            .iter()
            .find(|e| e.target == *target)
            .ok_or_else(|| TargetError::Unsupported {
                target: target.property_key(),
                table: self.name,
            })
    }

    /// Filename suffix for `target`.
    pub fn suffix_for(&self, target: &TargetSpec) -> Result<&'static str> {
        self.entry(target).map(|e| e.suffix)
    }
}
