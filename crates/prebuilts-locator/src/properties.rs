//! Typed property bags handed to the host build system.
//!
//! A [`ModuleProperties`] carries exactly what a descriptor set says, plus the
//! per-type toggles (enable flags, STL, disabled platforms). It is passed by
//! value to a [`crate::emit::PropertySink`]; there is no reflection-driven
//! merging.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::descriptor::{ArtifactExtra, ArtifactKind, DescriptorSet, Stubs};
use crate::env::{Environment, FORCE_BUILD_SANITIZER_SHARED_OBJECTS, LLVM_BUILD_HOST_TOOLS};
use crate::error::{LocatorError, Result};
use crate::module_type::ModuleType;

/// Key of the OS-wide windows toggle in [`ModuleProperties::target`].
pub const WINDOWS_KEY: &str = "windows";

/// Properties for one target (or OS-wide) key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetProperties {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub srcs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// The full property bag for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleProperties {
    pub name: String,
    pub module_type: ModuleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub srcs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub export_include_dirs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stubs: Option<Stubs>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub target: BTreeMap<String, TargetProperties>,
}

impl ModuleProperties {
    pub fn new(name: impl Into<String>, module_type: ModuleType) -> Self {
        Self {
            name: name.into(),
            module_type,
            enabled: None,
            srcs: Vec::new(),
            cmd: None,
            export_include_dirs: Vec::new(),
            stl: None,
            stubs: None,
            target: BTreeMap::new(),
        }
    }

    /// Fold a descriptor set into properties.
    ///
    /// File groups and header sets list their sources at the top level;
    /// every other kind lists them under the descriptor's target key.
    pub fn from_descriptors(module_type: ModuleType, set: &DescriptorSet) -> Result<Self> {
        let mut props = Self::new(set.module.clone(), module_type);
        for d in set {
            let per_target = !matches!(d.kind, ArtifactKind::FileGroup | ArtifactKind::HeaderSet);
            match d.target_key() {
                Some(key) if per_target => {
                    let entry = props.target.entry(key).or_default();
                    entry.srcs.push(d.source_path.clone());
                    if d.output_stem.is_some() {
                        entry.stem = d.output_stem.clone();
                    }
                }
                _ => props.srcs.push(d.source_path.clone()),
            }

            match &d.extra {
                ArtifactExtra::None | ArtifactExtra::ModuleReference => {}
                ArtifactExtra::Stubs(stubs) => match &props.stubs {
                    Some(existing) if existing != stubs => {
                        return Err(LocatorError::InvalidDescriptor {
                            name: set.module.clone(),
                            detail: "descriptors disagree on stub metadata".into(),
                        });
                    }
                    Some(_) => {}
                    None => props.stubs = Some(stubs.clone()),
                },
                ArtifactExtra::ExportIncludeDirs(dirs) => {
                    for dir in dirs {
                        if !props.export_include_dirs.contains(dir) {
                            props.export_include_dirs.push(dir.clone());
                        }
                    }
                }
                ArtifactExtra::Cmd(cmd) => props.cmd = Some(cmd.clone()),
            }
        }
        Ok(props)
    }

    /// Apply the toggles a module type sets regardless of its descriptors.
    pub fn apply_toggles(&mut self, env: &Environment) {
        match self.module_type {
            ModuleType::LlvmHostDefaults => {
                self.enabled = Some(env.is_true(LLVM_BUILD_HOST_TOOLS));
            }
            ModuleType::LlvmHostPrebuiltLibraryShared => {
                self.enabled = Some(env.is_true(LLVM_BUILD_HOST_TOOLS));
                self.stl = Some("none".into());
                self.target.entry(WINDOWS_KEY.into()).or_default().enabled = Some(false);
            }
            ModuleType::LibclangRtPrebuiltLibraryShared => {
                if env.is_true(FORCE_BUILD_SANITIZER_SHARED_OBJECTS) {
                    self.enabled = Some(false);
                }
            }
            ModuleType::LibclangRtPrebuiltLibraryStatic
            | ModuleType::LibclangRtPrebuiltObject
            | ModuleType::LlvmPrebuiltLibraryStatic
            | ModuleType::LlvmDarwinFilegroup
            | ModuleType::ClangBuiltinHeaders => {}
        }
    }

    /// Sources listed for `key`.
    pub fn srcs_for(&self, key: &str) -> &[String] {
        self.target.get(key).map(|t| t.srcs.as_slice()).unwrap_or(&[])
    }
}
