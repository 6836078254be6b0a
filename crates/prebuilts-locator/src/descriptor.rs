//! Artifact descriptors.
//!
//! A descriptor records where one artifact of a module lives for one target.
//! Descriptors are produced fresh per request and never mutated afterwards.

use std::fmt;

use prebuilts_targets::TargetSpec;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{LocatorError, Result};

/// The kind of prebuilt artifact a module provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    SharedLibrary,
    StaticLibrary,
    Object,
    HeaderSet,
    FileGroup,
}

impl ArtifactKind {
    /// File extension for a target, where the kind has one.
    pub fn extension(self, target: &TargetSpec) -> Option<&'static str> {
        use prebuilts_targets::Os;
        match self {
            ArtifactKind::SharedLibrary => Some("so"),
            ArtifactKind::StaticLibrary if target.os == Os::Windows => Some("lib"),
            ArtifactKind::StaticLibrary => Some("a"),
            ArtifactKind::Object => Some("o"),
            ArtifactKind::HeaderSet | ArtifactKind::FileGroup => None,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactKind::SharedLibrary => "shared library",
            ArtifactKind::StaticLibrary => "static library",
            ArtifactKind::Object => "object",
            ArtifactKind::HeaderSet => "header set",
            ArtifactKind::FileGroup => "file group",
        };
        f.write_str(s)
    }
}

/// Version baseline of the vendor ABI for runtime stubs.
pub const STUB_BASELINE_VERSION: &str = "29";
/// Sentinel for the in-development API level.
pub const STUB_CURRENT_VERSION: &str = "current";

/// Versioned-stub metadata for a vendor-interface library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Stubs {
    pub symbol_file: String,
    pub versions: Vec<String>,
}

impl Stubs {
    /// Stubs at the ABI baseline plus the current sentinel.
    pub fn vendor_interface(symbol_file: String) -> Self {
        Self {
            symbol_file,
            versions: vec![
                STUB_BASELINE_VERSION.to_string(),
                STUB_CURRENT_VERSION.to_string(),
            ],
        }
    }
}

/// Kind-specific metadata attached to a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "value")]
pub enum ArtifactExtra {
    #[default]
    None,
    /// Vendor-interface stub information.
    Stubs(Stubs),
    /// Header directories exported to dependents.
    ExportIncludeDirs(Vec<String>),
    /// Command that generates the header set.
    Cmd(String),
    /// The source path names another module (`:name`), not a file.
    ModuleReference,
}

/// Where one artifact of a module lives for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArtifactDescriptor {
    pub kind: ArtifactKind,
    /// `None` for target-independent artifacts such as builtin headers.
    pub target: Option<TargetSpec>,
    pub source_path: String,
    /// Installed filename (without extension) when it differs from the module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_stem: Option<String>,
    #[serde(default)]
    pub extra: ArtifactExtra,
}

impl ArtifactDescriptor {
    pub fn new(kind: ArtifactKind, target: Option<TargetSpec>, source_path: String) -> Self {
        Self {
            kind,
            target,
            source_path,
            output_stem: None,
            extra: ArtifactExtra::None,
        }
    }

    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.output_stem = Some(stem.into());
        self
    }

    pub fn with_extra(mut self, extra: ArtifactExtra) -> Self {
        self.extra = extra;
        self
    }

    /// Property key of the target, or `None` for target-independent artifacts.
    pub fn target_key(&self) -> Option<String> {
        self.target.map(|t| t.property_key())
    }
}

/// The descriptors computed for one module.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DescriptorSet {
    pub module: String,
    pub descriptors: Vec<ArtifactDescriptor>,
}

impl DescriptorSet {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            descriptors: Vec::new(),
        }
    }

    pub fn push(&mut self, descriptor: ArtifactDescriptor) {
        tracing::trace!(
            module = %self.module,
            target = ?descriptor.target_key(),
            path = %descriptor.source_path,
            "descriptor"
        );
        self.descriptors.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtifactDescriptor> {
        self.descriptors.iter()
    }

    /// Descriptor for `target`, if present.
    pub fn for_target(&self, target: &TargetSpec) -> Option<&ArtifactDescriptor> {
        self.descriptors.iter().find(|d| d.target.as_ref() == Some(target))
    }

    /// Check the set is complete: every descriptor has a source path and no
    /// target appears twice.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for d in &self.descriptors {
            if d.source_path.is_empty() {
                return Err(LocatorError::InvalidDescriptor {
                    name: self.module.clone(),
                    detail: format!("empty source path for {:?}", d.target_key()),
                });
            }
            if !seen.insert(d.target) {
                return Err(LocatorError::InvalidDescriptor {
                    name: self.module.clone(),
                    detail: format!("duplicate descriptor for {:?}", d.target_key()),
                });
            }
        }
        Ok(())
    }

    /// SHA-256 over the canonical JSON form of the set.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&bytes);
        Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
    }
}

impl<'a> IntoIterator for &'a DescriptorSet {
    type Item = &'a ArtifactDescriptor;
    type IntoIter = std::slice::Iter<'a, ArtifactDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(target: TargetSpec, path: &str) -> ArtifactDescriptor {
        ArtifactDescriptor::new(ArtifactKind::SharedLibrary, Some(target), path.into())
    }

    #[test]
    fn extensions() {
        assert_eq!(
            ArtifactKind::StaticLibrary.extension(&TargetSpec::WINDOWS_X86_64),
            Some("lib")
        );
        assert_eq!(
            ArtifactKind::StaticLibrary.extension(&TargetSpec::DARWIN_X86_64),
            Some("a")
        );
        assert_eq!(ArtifactKind::Object.extension(&TargetSpec::GLIBC_X86), Some("o"));
        assert_eq!(ArtifactKind::HeaderSet.extension(&TargetSpec::GLIBC_X86), None);
    }

    #[test]
    fn vendor_stubs_versions() {
        let stubs = Stubs::vendor_interface("x.map.txt".into());
        assert_eq!(stubs.versions, vec!["29", "current"]);
    }

    #[test]
    fn validate_rejects_empty_path() {
        let mut set = DescriptorSet::new("m");
        set.push(shared(TargetSpec::ANDROID_ARM, ""));
        let err = set.validate().unwrap_err();
        assert!(err.to_string().contains("empty source path"));
    }

    #[test]
    fn validate_rejects_duplicate_target() {
        let mut set = DescriptorSet::new("m");
        set.push(shared(TargetSpec::ANDROID_ARM, "a.so"));
        set.push(shared(TargetSpec::ANDROID_ARM, "b.so"));
        assert!(set.validate().is_err());
    }

    #[test]
    fn fingerprint_tracks_content() {
        let mut a = DescriptorSet::new("m");
        a.push(shared(TargetSpec::ANDROID_ARM, "a.so"));
        let mut b = a.clone();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_eq!(a.fingerprint().unwrap().len(), 64);

        b.descriptors[0].source_path = "b.so".into();
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn json_shape() {
        let d = shared(TargetSpec::LINUX_MUSL_ARM, "x.so").with_stem("x");
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["kind"], "shared-library");
        assert_eq!(v["target"], "linux_musl_arm");
        assert_eq!(v["output-stem"], "x");
        assert_eq!(v["extra"]["type"], "none");
        let back: ArtifactDescriptor = serde_json::from_value(v).unwrap();
        assert_eq!(back, d);
    }
}
