//! Target tuples.
//!
//! Every target the toolchain ships runtime artifacts for is a `const` below;
//! targets are never built from arbitrary (OS, arch) pairs at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TargetError;

/// Operating system family of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Os {
    Android,
    /// Bionic libc on a non-Android Linux host.
    LinuxBionic,
    Glibc,
    LinuxMusl,
    Darwin,
    Windows,
}

impl Os {
    /// All OS families, in table order.
    pub const ALL: [Os; 6] = [
        Os::Android,
        Os::LinuxBionic,
        Os::Glibc,
        Os::LinuxMusl,
        Os::Darwin,
        Os::Windows,
    ];

    /// Prefix used in per-target property keys (e.g. `linux_glibc`).
    pub fn property_prefix(self) -> &'static str {
        match self {
            Os::Android => "android",
            Os::LinuxBionic => "linux_bionic",
            Os::Glibc => "linux_glibc",
            Os::LinuxMusl => "linux_musl",
            Os::Darwin => "darwin",
            Os::Windows => "windows",
        }
    }

    /// Whether artifacts for this OS are optional in a distribution.
    pub fn is_optional(self) -> bool {
        matches!(self, Os::Darwin | Os::Windows)
    }
}

/// CPU architecture of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    Arm,
    Arm64,
    Riscv64,
    X86,
    X86_64,
}

impl Arch {
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Arm => "arm",
            Arch::Arm64 => "arm64",
            Arch::Riscv64 => "riscv64",
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
        }
    }
}

impl FromStr for Arch {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arm" => Ok(Arch::Arm),
            "arm64" => Ok(Arch::Arm64),
            "riscv64" => Ok(Arch::Riscv64),
            "x86" => Ok(Arch::X86),
            "x86_64" => Ok(Arch::X86_64),
            _ => Err(TargetError::Unrecognized { input: s.into() }),
        }
    }
}

/// An (OS, architecture, libc variant) tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct TargetSpec {
    pub os: Os,
    pub arch: Arch,
    /// Libc flavour where the OS alone does not pin it (musl hard-float ARM).
    pub libc_variant: Option<&'static str>,
}

impl TargetSpec {
    const fn new(os: Os, arch: Arch) -> Self {
        Self {
            os,
            arch,
            libc_variant: None,
        }
    }

    const fn musl(arch: Arch, variant: &'static str) -> Self {
        Self {
            os: Os::LinuxMusl,
            arch,
            libc_variant: Some(variant),
        }
    }

    pub const ANDROID_ARM: Self = Self::new(Os::Android, Arch::Arm);
    pub const ANDROID_ARM64: Self = Self::new(Os::Android, Arch::Arm64);
    pub const ANDROID_RISCV64: Self = Self::new(Os::Android, Arch::Riscv64);
    pub const ANDROID_X86: Self = Self::new(Os::Android, Arch::X86);
    pub const ANDROID_X86_64: Self = Self::new(Os::Android, Arch::X86_64);
    pub const LINUX_BIONIC_ARM64: Self = Self::new(Os::LinuxBionic, Arch::Arm64);
    pub const LINUX_BIONIC_X86_64: Self = Self::new(Os::LinuxBionic, Arch::X86_64);
    pub const GLIBC_X86: Self = Self::new(Os::Glibc, Arch::X86);
    pub const GLIBC_X86_64: Self = Self::new(Os::Glibc, Arch::X86_64);
    pub const LINUX_MUSL_ARM: Self = Self::musl(Arch::Arm, "musleabihf");
    pub const LINUX_MUSL_ARM64: Self = Self::musl(Arch::Arm64, "musl");
    pub const LINUX_MUSL_X86: Self = Self::musl(Arch::X86, "musl");
    pub const LINUX_MUSL_X86_64: Self = Self::musl(Arch::X86_64, "musl");
    pub const DARWIN_X86_64: Self = Self::new(Os::Darwin, Arch::X86_64);
    pub const WINDOWS_X86_64: Self = Self::new(Os::Windows, Arch::X86_64);

    /// Every target known to the model.
    pub const ALL: [Self; 15] = [
        Self::ANDROID_ARM,
        Self::ANDROID_ARM64,
        Self::ANDROID_RISCV64,
        Self::ANDROID_X86,
        Self::ANDROID_X86_64,
        Self::LINUX_BIONIC_ARM64,
        Self::LINUX_BIONIC_X86_64,
        Self::GLIBC_X86,
        Self::GLIBC_X86_64,
        Self::LINUX_MUSL_ARM,
        Self::LINUX_MUSL_ARM64,
        Self::LINUX_MUSL_X86,
        Self::LINUX_MUSL_X86_64,
        Self::DARWIN_X86_64,
        Self::WINDOWS_X86_64,
    ];

    /// Look up a known target by OS and architecture.
    pub fn lookup(os: Os, arch: Arch) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.os == os && t.arch == arch)
    }

    /// Per-target property key (e.g. `android_arm64`, `linux_musl_x86_64`).
    pub fn property_key(&self) -> String {
        format!("{}_{}", self.os.property_prefix(), self.arch.as_str())
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os.property_prefix(), self.arch.as_str())
    }
}

impl FromStr for TargetSpec {
    type Err = TargetError;

    /// Accepts `linux_musl_arm64` as well as `linux-musl-arm64`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        let unrecognized = || TargetError::Unrecognized { input: s.into() };

        // Longest prefixes first so `linux_bionic` never parses as `linux`.
        let mut by_len = Os::ALL;
        by_len.sort_by_key(|os| std::cmp::Reverse(os.property_prefix().len()));

        let (os, arch) = by_len
            .into_iter()
            .find_map(|os| {
                normalized
                    .strip_prefix(os.property_prefix())
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|arch| (os, arch))
            })
            .ok_or_else(unrecognized)?;
        let arch: Arch = arch.parse().map_err(|_| unrecognized())?;
        Self::lookup(os, arch).ok_or_else(unrecognized)
    }
}

impl From<TargetSpec> for String {
    fn from(t: TargetSpec) -> Self {
        t.property_key()
    }
}

impl<'de> Deserialize<'de> for TargetSpec {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        String::deserialize(d)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
