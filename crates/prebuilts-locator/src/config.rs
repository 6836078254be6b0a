//! `prebuilts.toml` configuration and module manifests.
//!
//! The config file only replaces built-in defaults; environment overrides
//! still take precedence over anything set here.
//!
//! ```toml
//! [toolchain]
//! base = "."
//! version = "clang-r522817"
//! release = "18"
//!
//! [resolve]
//! module-dir = "prebuilts/clang/host/linux-x86"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LocatorError, Result};
use crate::release::{VersionResolver, DEFAULT_SHORT_VERSION, DEFAULT_VERSION};

/// Name of the config file searched for upward from the working directory.
pub const CONFIG_FILE: &str = "prebuilts.toml";

/// Top-level locator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LocatorConfig {
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub resolve: ResolveConfig,
}

/// `[toolchain]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Directory holding toolchain version directories.
    #[serde(default)]
    pub base: Option<String>,
    /// Fallback for `LLVM_PREBUILTS_VERSION`.
    #[serde(default)]
    pub version: Option<String>,
    /// Fallback for `LLVM_RELEASE_VERSION`.
    #[serde(default)]
    pub release: Option<String>,
}

/// `[resolve]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResolveConfig {
    /// Directory the module definitions live in, relative to the config file.
    #[serde(default)]
    pub module_dir: Option<String>,
}

impl LocatorConfig {
    /// Search upward from `start_dir` for `prebuilts.toml`, returning it with
    /// the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                tracing::debug!(path = %candidate.display(), "loaded config");
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| LocatorError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// Parse a config from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Version resolver seeded with the configured fallbacks.
    pub fn resolver(&self) -> VersionResolver {
        VersionResolver::new(
            self.toolchain.version.as_deref().unwrap_or(DEFAULT_VERSION),
            self.toolchain.release.as_deref().unwrap_or(DEFAULT_SHORT_VERSION),
        )
    }

    pub fn base(&self) -> &str {
        self.toolchain.base.as_deref().unwrap_or(".")
    }

    pub fn module_dir(&self) -> &str {
        self.resolve.module_dir.as_deref().unwrap_or(".")
    }
}

/// A list of modules to resolve in one batch.
///
/// ```toml
/// [[module]]
/// type = "libclang_rt_prebuilt_library_shared"
/// name = "prebuilt_libclang_rt.asan"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleEntry>,
}

/// One module in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    #[serde(rename = "type")]
    pub module_type: String,
    pub name: String,
}

impl ModuleManifest {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(LocatorError::Config {
                path: path.to_path_buf(),
                detail: "manifest not found".into(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| LocatorError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
