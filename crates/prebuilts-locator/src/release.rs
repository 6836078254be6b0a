//! Toolchain release resolution.

use serde::{Deserialize, Serialize};

use crate::env::{Environment, LLVM_PREBUILTS_VERSION, LLVM_RELEASE_VERSION};

/// Toolchain directory used when no override is set.
pub const DEFAULT_VERSION: &str = "clang-r522817";
/// Clang release version used when no override is set.
pub const DEFAULT_SHORT_VERSION: &str = "18";

/// The active toolchain: its directory name and clang release version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainRelease {
    version: String,
    short_version: String,
}

impl ToolchainRelease {
    pub fn new(version: impl Into<String>, short_version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            short_version: short_version.into(),
        }
    }

    /// Toolchain directory name (e.g. `clang-r522817`).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Clang release version (e.g. `18` or `18.0.1`).
    pub fn short_version(&self) -> &str {
        &self.short_version
    }

    /// Leading component of the release version (`18.0.1` -> `18`).
    pub fn major(&self) -> &str {
        trim_version(&self.short_version, 1)
    }
}

/// Keep the first `retain` dot-separated components of `version`.
pub fn trim_version(version: &str, retain: usize) -> &str {
    if retain == 0 {
        return "";
    }
    match version.match_indices('.').nth(retain - 1) {
        Some((idx, _)) => &version[..idx],
        None => version,
    }
}

/// Resolves the active release from environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionResolver {
    default_version: String,
    default_short_version: String,
}

impl Default for VersionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION, DEFAULT_SHORT_VERSION)
    }
}

impl VersionResolver {
    /// A resolver with custom fallbacks (used by `prebuilts.toml`).
    pub fn new(
        default_version: impl Into<String>,
        default_short_version: impl Into<String>,
    ) -> Self {
        Self {
            default_version: default_version.into(),
            default_short_version: default_short_version.into(),
        }
    }

    /// Resolve the release. Absent overrides are not an error.
    pub fn resolve(&self, env: &Environment) -> ToolchainRelease {
        let release = ToolchainRelease::new(
            env.get_with_default(LLVM_PREBUILTS_VERSION, &self.default_version),
            env.get_with_default(LLVM_RELEASE_VERSION, &self.default_short_version),
        );
        tracing::debug!(
            version = release.version(),
            short_version = release.short_version(),
            "resolved toolchain release"
        );
        release
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_overrides() {
        let release = VersionResolver::default().resolve(&Environment::empty());
        assert_eq!(release.version(), DEFAULT_VERSION);
        assert_eq!(release.short_version(), DEFAULT_SHORT_VERSION);
        assert_eq!(release.major(), "18");
    }

    #[test]
    fn environment_overrides() {
        let env = Environment::from_pairs([
            (LLVM_PREBUILTS_VERSION, "clang-r530567"),
            (LLVM_RELEASE_VERSION, "19.0.1"),
        ]);
        let release = VersionResolver::default().resolve(&env);
        assert_eq!(release.version(), "clang-r530567");
        assert_eq!(release.short_version(), "19.0.1");
        assert_eq!(release.major(), "19");
    }

    #[test]
    fn configured_defaults_yield_to_environment() {
        let resolver = VersionResolver::new("clang-r1", "17");
        assert_eq!(resolver.resolve(&Environment::empty()).version(), "clang-r1");
        let env = Environment::from_pairs([(LLVM_PREBUILTS_VERSION, "clang-r2")]);
        let release = resolver.resolve(&env);
        assert_eq!(release.version(), "clang-r2");
        assert_eq!(release.short_version(), "17");
    }

    #[test]
    fn trim_version_components() {
        assert_eq!(trim_version("18.0.1", 1), "18");
        assert_eq!(trim_version("18.0.1", 2), "18.0");
        assert_eq!(trim_version("18.0.1", 5), "18.0.1");
        assert_eq!(trim_version("18", 1), "18");
        assert_eq!(trim_version("18", 0), "");
    }
}
