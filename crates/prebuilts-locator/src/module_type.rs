//! Module types a host build system can register.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::descriptor::ArtifactKind;
use crate::error::LocatorError;

/// A module type whose properties the locator computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    /// Defaults shared by host LLVM modules; carries only the enable toggle.
    LlvmHostDefaults,
    /// Host LLVM shared library (libclang, libc++, ...).
    LlvmHostPrebuiltLibraryShared,
    /// compiler-rt shared runtime for every device and host target.
    LibclangRtPrebuiltLibraryShared,
    /// compiler-rt static runtime for every device and host target.
    LibclangRtPrebuiltLibraryStatic,
    /// compiler-rt object (crtbegin, crtend, ...).
    LibclangRtPrebuiltObject,
    /// Non-runtime static library for Android targets (libFuzzer, ...).
    LlvmPrebuiltLibraryStatic,
    /// Darwin build of a host library, present only in some distributions.
    LlvmDarwinFilegroup,
    /// Clang's builtin header directory.
    ClangBuiltinHeaders,
}

impl ModuleType {
    pub const ALL: [ModuleType; 8] = [
        ModuleType::LlvmHostDefaults,
        ModuleType::LlvmHostPrebuiltLibraryShared,
        ModuleType::LibclangRtPrebuiltLibraryShared,
        ModuleType::LibclangRtPrebuiltLibraryStatic,
        ModuleType::LibclangRtPrebuiltObject,
        ModuleType::LlvmPrebuiltLibraryStatic,
        ModuleType::LlvmDarwinFilegroup,
        ModuleType::ClangBuiltinHeaders,
    ];

    /// Registered type name.
    pub fn name(self) -> &'static str {
        match self {
            ModuleType::LlvmHostDefaults => "llvm_host_defaults",
            ModuleType::LlvmHostPrebuiltLibraryShared => "llvm_host_prebuilt_library_shared",
            ModuleType::LibclangRtPrebuiltLibraryShared => "libclang_rt_prebuilt_library_shared",
            ModuleType::LibclangRtPrebuiltLibraryStatic => "libclang_rt_prebuilt_library_static",
            ModuleType::LibclangRtPrebuiltObject => "libclang_rt_prebuilt_object",
            ModuleType::LlvmPrebuiltLibraryStatic => "llvm_prebuilt_library_static",
            ModuleType::LlvmDarwinFilegroup => "llvm_darwin_filegroup",
            ModuleType::ClangBuiltinHeaders => "clang_builtin_headers",
        }
    }

    /// Artifact kind the type describes; `None` for defaults modules.
    pub fn kind(self) -> Option<ArtifactKind> {
        match self {
            ModuleType::LlvmHostDefaults => None,
            ModuleType::LlvmHostPrebuiltLibraryShared
            | ModuleType::LibclangRtPrebuiltLibraryShared => Some(ArtifactKind::SharedLibrary),
            ModuleType::LibclangRtPrebuiltLibraryStatic | ModuleType::LlvmPrebuiltLibraryStatic => {
                Some(ArtifactKind::StaticLibrary)
            }
            ModuleType::LibclangRtPrebuiltObject => Some(ArtifactKind::Object),
            ModuleType::LlvmDarwinFilegroup => Some(ArtifactKind::FileGroup),
            ModuleType::ClangBuiltinHeaders => Some(ArtifactKind::HeaderSet),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ModuleType::LlvmHostDefaults => "enable toggle for host LLVM modules",
            ModuleType::LlvmHostPrebuiltLibraryShared => "host LLVM shared library",
            ModuleType::LibclangRtPrebuiltLibraryShared => "compiler-rt shared runtime",
            ModuleType::LibclangRtPrebuiltLibraryStatic => "compiler-rt static runtime",
            ModuleType::LibclangRtPrebuiltObject => "compiler-rt object",
            ModuleType::LlvmPrebuiltLibraryStatic => "LLVM static library for Android targets",
            ModuleType::LlvmDarwinFilegroup => "darwin host library (optional)",
            ModuleType::ClangBuiltinHeaders => "clang builtin headers",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModuleType {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| LocatorError::UnknownModuleType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for t in ModuleType::ALL {
            assert_eq!(t.name().parse::<ModuleType>().unwrap(), t);
        }
    }

    #[test]
    fn serde_name_matches_registered_name() {
        for t in ModuleType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.name()));
        }
    }

    #[test]
    fn unknown_type() {
        let err = "cc_prebuilt_library".parse::<ModuleType>().unwrap_err();
        assert!(matches!(err, LocatorError::UnknownModuleType(_)));
    }

    #[test]
    fn kinds() {
        assert_eq!(ModuleType::LlvmHostDefaults.kind(), None);
        assert_eq!(
            ModuleType::LibclangRtPrebuiltObject.kind(),
            Some(ArtifactKind::Object)
        );
        assert_eq!(
            ModuleType::LlvmPrebuiltLibraryStatic.kind(),
            Some(ArtifactKind::StaticLibrary)
        );
        assert_eq!(
            ModuleType::ClangBuiltinHeaders.kind(),
            Some(ArtifactKind::HeaderSet)
        );
    }
}
