//! Module-name conventions.
//!
//! Every prebuilt module is named `prebuilt_<library>`, optionally with a
//! suffix that carries meaning (`.llndk` for vendor-interface runtimes,
//! `_host` for host-only libraries). Names outside these conventions are
//! rejected; nothing here guesses.

use crate::error::{LocatorError, Result};
use crate::release::ToolchainRelease;

/// Prefix carried by every prebuilt module name.
pub const MODULE_PREFIX: &str = "prebuilt_";
/// Suffix marking a vendor-interface runtime library.
pub const VENDOR_INTERFACE_SUFFIX: &str = ".llndk";
/// Suffix marking a host-only library module.
pub const HOST_SUFFIX: &str = "_host";
/// Suffix of darwin file-group modules.
pub const DARWIN_SUFFIX: &str = "_darwin";

const RUNTIME_PREFIX: &str = "libclang_rt.";

/// A compiler-rt runtime library named by a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeName {
    /// Library name without prefix or suffix (e.g. `libclang_rt.hwasan`).
    pub library: String,
    /// Whether the module exports a versioned vendor ABI.
    pub vendor_interface: bool,
}

/// Map a runtime library module name to its library name.
pub fn runtime_library(module_type: &'static str, module: &str) -> Result<RuntimeName> {
    let stripped = module.strip_prefix(MODULE_PREFIX).ok_or_else(|| {
        LocatorError::unknown_module(
            module_type,
            module,
            format!("expected the '{MODULE_PREFIX}' prefix"),
        )
    })?;
    let (library, vendor_interface) = match stripped.strip_suffix(VENDOR_INTERFACE_SUFFIX) {
        Some(lib) => (lib, true),
        None => (stripped, false),
    };
    if library.strip_prefix(RUNTIME_PREFIX).map_or(true, str::is_empty) {
        return Err(LocatorError::unknown_module(
            module_type,
            module,
            format!("expected a '{MODULE_PREFIX}{RUNTIME_PREFIX}<name>' module"),
        ));
    }
    Ok(RuntimeName {
        library: library.to_string(),
        vendor_interface,
    })
}

/// Map a static runtime library module name to its library name.
///
/// Only shared runtimes export a vendor ABI, so `.llndk` is rejected here.
pub fn runtime_static_library(module_type: &'static str, module: &str) -> Result<String> {
    let runtime = runtime_library(module_type, module)?;
    if runtime.vendor_interface {
        return Err(LocatorError::unknown_module(
            module_type,
            module,
            "static libraries have no vendor interface",
        ));
    }
    Ok(runtime.library)
}

/// Map a runtime object module name to its object name.
///
/// Objects drop the `lib` prefix: `prebuilt_libclang_rt.crtbegin` names
/// `clang_rt.crtbegin`.
pub fn runtime_object(module_type: &'static str, module: &str) -> Result<String> {
    let runtime = runtime_library(module_type, module)?;
    if runtime.vendor_interface {
        return Err(LocatorError::unknown_module(
            module_type,
            module,
            "objects have no vendor interface",
        ));
    }
    Ok(runtime
        .library
        .strip_prefix("lib")
        .unwrap_or(&runtime.library)
        .to_string())
}

/// Linux filename of a host library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinuxFile {
    Plain(&'static str),
    /// Carries the release major version after `.so`.
    Versioned(&'static str),
}

/// A host library the toolchain ships for linux and darwin hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostLibrary {
    pub module: &'static str,
    linux: LinuxFile,
    pub darwin: &'static str,
    /// Subdirectory of `include/` exported to dependents.
    pub include_subdir: Option<&'static str>,
}

const HOST_LIBRARIES: [HostLibrary; 5] = [
    HostLibrary {
        module: "prebuilt_libclang",
        linux: LinuxFile::Versioned("libclang.so"),
        darwin: "libclang.dylib",
        include_subdir: None,
    },
    HostLibrary {
        module: "prebuilt_libclang-cpp",
        linux: LinuxFile::Versioned("libclang-cpp.so"),
        darwin: "libclang-cpp.dylib",
        include_subdir: None,
    },
    HostLibrary {
        module: "prebuilt_libc++",
        linux: LinuxFile::Plain("libc++.so"),
        darwin: "libc++.dylib",
        include_subdir: Some("c++/v1"),
    },
    HostLibrary {
        module: "prebuilt_libc++abi",
        linux: LinuxFile::Plain("libc++abi.so"),
        darwin: "libc++abi.dylib",
        include_subdir: None,
    },
    HostLibrary {
        module: "prebuilt_libLLVM_host",
        linux: LinuxFile::Plain("libLLVM.so"),
        darwin: "libLLVM.dylib",
        include_subdir: None,
    },
];

impl HostLibrary {
    /// Look up a host library by module name.
    pub fn lookup(module_type: &'static str, module: &str) -> Result<&'static HostLibrary> {
        HOST_LIBRARIES
            .iter()
            .find(|h| h.module == module)
            .ok_or_else(|| {
                LocatorError::unknown_module(module_type, module, "not a known host LLVM library")
            })
    }

    /// Look up the host library a darwin file group belongs to.
    pub fn for_darwin_filegroup(
        module_type: &'static str,
        filegroup: &str,
    ) -> Result<&'static HostLibrary> {
        if !filegroup.ends_with(DARWIN_SUFFIX) {
            return Err(LocatorError::unknown_module(
                module_type,
                filegroup,
                format!("expected the '{DARWIN_SUFFIX}' suffix"),
            ));
        }
        HOST_LIBRARIES
            .iter()
            .find(|h| h.darwin_filegroup() == filegroup)
            .ok_or_else(|| {
                LocatorError::unknown_module(
                    module_type,
                    filegroup,
                    "not a known host LLVM library",
                )
            })
    }

    /// Linux filename for `release`.
    pub fn linux_file(&self, release: &ToolchainRelease) -> String {
        match self.linux {
            LinuxFile::Plain(name) => name.to_string(),
            LinuxFile::Versioned(name) => format!("{name}.{}", release.major()),
        }
    }

    /// Name of the file-group module holding this library's darwin build.
    pub fn darwin_filegroup(&self) -> String {
        darwin_filegroup_name(self.module)
    }
}

/// `prebuilt_libLLVM_host` -> `libLLVM_darwin`.
fn darwin_filegroup_name(module: &str) -> String {
    let base = module.strip_prefix(MODULE_PREFIX).unwrap_or(module);
    let base = base.strip_suffix(HOST_SUFFIX).unwrap_or(base);
    format!("{base}{DARWIN_SUFFIX}")
}

/// A non-runtime static library shipped per Android architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticLibrary {
    pub module: &'static str,
    /// Headers exported to dependents, relative to the toolchain root.
    pub export_subdir: &'static str,
}

const STATIC_LIBRARIES: [StaticLibrary; 2] = [
    StaticLibrary {
        module: "prebuilt_libFuzzer",
        export_subdir: "prebuilt_include/llvm/lib/Fuzzer",
    },
    StaticLibrary {
        module: "prebuilt_libsimpleperf_readelf",
        export_subdir: "include",
    },
];

impl StaticLibrary {
    /// Look up a static library by module name.
    pub fn lookup(module_type: &'static str, module: &str) -> Result<&'static StaticLibrary> {
        STATIC_LIBRARIES
            .iter()
            .find(|l| l.module == module)
            .ok_or_else(|| {
                LocatorError::unknown_module(module_type, module, "not a known LLVM static library")
            })
    }

    /// Library name without the module prefix (`libFuzzer`).
    pub fn library(&self) -> &'static str {
        self.module.strip_prefix(MODULE_PREFIX).unwrap_or(self.module)
    }
}
