//! Per-kind descriptor builders.
//!
//! Each builder walks the architecture table that applies to its kind once
//! and emits one descriptor per row. Unknown module names fail before any
//! descriptor is produced. Optional darwin/windows rows are probed and
//! skipped when absent.

use prebuilts_targets::{ArchitectureTable, TableEntry, TargetSpec};

use crate::descriptor::{ArtifactDescriptor, ArtifactExtra, ArtifactKind, DescriptorSet, Stubs};
use crate::env::{Environment, FORCE_BUILD_SANITIZER_SHARED_OBJECTS};
use crate::error::Result;
use crate::module_type::ModuleType;
use crate::names::{self, HostLibrary, StaticLibrary};
use crate::paths::{join, PathBuilder};
use crate::probe::FileProbe;
use crate::release::ToolchainRelease;

/// Inputs shared by every builder for one request.
pub struct DescribeContext<'a> {
    pub release: &'a ToolchainRelease,
    pub paths: &'a PathBuilder,
    pub env: &'a Environment,
    /// Directory of the module definition; probes and commands are relative to it.
    pub module_dir: &'a str,
    pub probe: &'a dyn FileProbe,
}

/// Describe the artifacts of `module` for a module type.
pub fn describe(
    module_type: ModuleType,
    module: &str,
    cx: &DescribeContext<'_>,
) -> Result<DescriptorSet> {
    let set = match module_type {
        ModuleType::LlvmHostDefaults => Ok(DescriptorSet::new(module)),
        ModuleType::LlvmHostPrebuiltLibraryShared => host_shared(module, cx),
        ModuleType::LibclangRtPrebuiltLibraryShared => runtime_shared(module, cx),
        ModuleType::LibclangRtPrebuiltLibraryStatic => runtime_static(module, cx),
        ModuleType::LibclangRtPrebuiltObject => runtime_object(module, cx),
        ModuleType::LlvmPrebuiltLibraryStatic => llvm_static(module, cx),
        ModuleType::LlvmDarwinFilegroup => darwin_filegroup(module, cx),
        ModuleType::ClangBuiltinHeaders => builtin_headers(module, cx),
    }?;
    set.validate()?;
    Ok(set)
}

fn table_path(
    cx: &DescribeContext<'_>,
    kind: ArtifactKind,
    entry: &TableEntry,
    name: &str,
) -> (String, String) {
    let stem = format!("{name}{}", entry.suffix);
    let file = match kind.extension(&entry.target) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.clone(),
    };
    (join([cx.paths.location_dir(entry.location), file]), stem)
}

fn host_shared(module: &str, cx: &DescribeContext<'_>) -> Result<DescriptorSet> {
    let lib = HostLibrary::lookup(ModuleType::LlvmHostPrebuiltLibraryShared.name(), module)?;
    let include = match lib.include_subdir {
        Some(sub) => join([cx.paths.include_dir().as_str(), sub]),
        None => cx.paths.include_dir(),
    };

    let mut set = DescriptorSet::new(module);
    set.push(
        ArtifactDescriptor::new(
            ArtifactKind::SharedLibrary,
            Some(TargetSpec::GLIBC_X86_64),
            join([cx.paths.lib_dir(), lib.linux_file(cx.release)]),
        )
        .with_extra(ArtifactExtra::ExportIncludeDirs(vec![include])),
    );
    set.push(
        ArtifactDescriptor::new(
            ArtifactKind::SharedLibrary,
            Some(TargetSpec::DARWIN_X86_64),
            format!(":{}", lib.darwin_filegroup()),
        )
        .with_extra(ArtifactExtra::ModuleReference),
    );
    Ok(set)
}

fn runtime_shared(module: &str, cx: &DescribeContext<'_>) -> Result<DescriptorSet> {
    let rt = names::runtime_library(ModuleType::LibclangRtPrebuiltLibraryShared.name(), module)?;
    let mut set = DescriptorSet::new(module);
    if cx.env.is_true(FORCE_BUILD_SANITIZER_SHARED_OBJECTS) {
        tracing::debug!(module, "sanitizer runtimes built from source; no prebuilts");
        return Ok(set);
    }

    let stubs = rt.vendor_interface.then(|| {
        Stubs::vendor_interface(join([
            cx.paths.resource_dir(),
            format!("{}.map.txt", rt.library),
        ]))
    });

    for entry in ArchitectureTable::DYNAMIC.entries() {
        let (path, stem) = table_path(cx, ArtifactKind::SharedLibrary, entry, &rt.library);
        let mut d = ArtifactDescriptor::new(ArtifactKind::SharedLibrary, Some(entry.target), path)
            .with_stem(stem);
        if let Some(stubs) = &stubs {
            d = d.with_extra(ArtifactExtra::Stubs(stubs.clone()));
        }
        set.push(d);
    }
    Ok(set)
}

fn runtime_static(module: &str, cx: &DescribeContext<'_>) -> Result<DescriptorSet> {
    let library =
        names::runtime_static_library(ModuleType::LibclangRtPrebuiltLibraryStatic.name(), module)?;
    let mut set = DescriptorSet::new(module);
    for entry in ArchitectureTable::STATIC.entries() {
        let (path, _) = table_path(cx, ArtifactKind::StaticLibrary, entry, &library);
        if entry.optional && !cx.probe.exists(&path) {
            tracing::debug!(
                module,
                target = %entry.target,
                %path,
                "optional artifact absent; skipped"
            );
            continue;
        }
        set.push(ArtifactDescriptor::new(
            ArtifactKind::StaticLibrary,
            Some(entry.target),
            path,
        ));
    }
    Ok(set)
}

fn runtime_object(module: &str, cx: &DescribeContext<'_>) -> Result<DescriptorSet> {
    let object = names::runtime_object(ModuleType::LibclangRtPrebuiltObject.name(), module)?;
    let mut set = DescriptorSet::new(module);
    for entry in ArchitectureTable::STATIC.required_entries() {
        let (path, _) = table_path(cx, ArtifactKind::Object, entry, &object);
        set.push(ArtifactDescriptor::new(ArtifactKind::Object, Some(entry.target), path));
    }
    Ok(set)
}

fn llvm_static(module: &str, cx: &DescribeContext<'_>) -> Result<DescriptorSet> {
    let lib = StaticLibrary::lookup(ModuleType::LlvmPrebuiltLibraryStatic.name(), module)?;
    let export = join([cx.paths.root(), lib.export_subdir]);
    let mut set = DescriptorSet::new(module);
    for entry in ArchitectureTable::PER_ARCH.entries() {
        let (path, _) = table_path(cx, ArtifactKind::StaticLibrary, entry, lib.library());
        set.push(
            ArtifactDescriptor::new(ArtifactKind::StaticLibrary, Some(entry.target), path)
                .with_extra(ArtifactExtra::ExportIncludeDirs(vec![export.clone()])),
        );
    }
    Ok(set)
}

fn darwin_filegroup(module: &str, cx: &DescribeContext<'_>) -> Result<DescriptorSet> {
    let lib = HostLibrary::for_darwin_filegroup(ModuleType::LlvmDarwinFilegroup.name(), module)?;
    let path = join([cx.paths.lib_dir().as_str(), lib.darwin]);
    let mut set = DescriptorSet::new(module);
    if cx.probe.exists(&path) {
        set.push(ArtifactDescriptor::new(
            ArtifactKind::FileGroup,
            Some(TargetSpec::DARWIN_X86_64),
            path,
        ));
    } else {
        tracing::debug!(module, %path, "darwin library absent; file group left empty");
    }
    Ok(set)
}

fn builtin_headers(module: &str, cx: &DescribeContext<'_>) -> Result<DescriptorSet> {
    let dir = cx.paths.builtin_headers_dir();
    let cmd = format!(
        "$(location) {} $(in) >$(out)",
        join([cx.module_dir, dir.as_str()])
    );
    let mut set = DescriptorSet::new(module);
    set.push(
        ArtifactDescriptor::new(ArtifactKind::HeaderSet, None, join([dir.as_str(), "**/*.h"]))
            .with_extra(ArtifactExtra::Cmd(cmd)),
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::LLVM_RELEASE_VERSION;
    use crate::error::LocatorError;
    use crate::probe::StaticProbe;

    struct Fixture {
        release: ToolchainRelease,
        paths: PathBuilder,
        env: Environment,
        probe: StaticProbe,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with(Environment::empty(), StaticProbe::empty())
        }

        fn with(env: Environment, probe: StaticProbe) -> Self {
            let release = crate::release::VersionResolver::default().resolve(&env);
            let paths = PathBuilder::new(".", &release);
            Self {
                release,
                paths,
                env,
                probe,
            }
        }

        fn describe(&self, t: ModuleType, module: &str) -> Result<DescriptorSet> {
            let cx = DescribeContext {
                release: &self.release,
                paths: &self.paths,
                env: &self.env,
                module_dir: "prebuilts/clang/host/linux-x86",
                probe: &self.probe,
            };
            describe(t, module, &cx)
        }
    }

    #[test]
    fn runtime_shared_covers_dynamic_table() {
        let f = Fixture::new();
        let set = f
            .describe(ModuleType::LibclangRtPrebuiltLibraryShared, "prebuilt_libclang_rt.asan")
            .unwrap();
        assert_eq!(set.len(), ArchitectureTable::DYNAMIC.entries().len());

        let arm64 = set.for_target(&TargetSpec::ANDROID_ARM64).unwrap();
        assert_eq!(
            arm64.source_path,
            "clang-r522817/lib/clang/18/lib/linux/libclang_rt.asan-aarch64-android.so"
        );
        assert_eq!(
            arm64.output_stem.as_deref(),
            Some("libclang_rt.asan-aarch64-android")
        );
        assert_eq!(arm64.extra, ArtifactExtra::None);

        let musl = set.for_target(&TargetSpec::LINUX_MUSL_ARM).unwrap();
        assert_eq!(
            musl.source_path,
            "clang-r522817/musl/lib/arm-unknown-linux-musleabihf/lib/linux/libclang_rt.asan-armhf.so"
        );
    }

    #[test]
    fn vendor_interface_adds_stubs() {
        let f = Fixture::new();
        let set = f
            .describe(
                ModuleType::LibclangRtPrebuiltLibraryShared,
                "prebuilt_libclang_rt.hwasan.llndk",
            )
            .unwrap();
        for d in &set {
            let ArtifactExtra::Stubs(stubs) = &d.extra else {
                panic!("missing stubs for {:?}", d.target);
            };
            assert_eq!(stubs.versions, vec!["29", "current"]);
            assert_eq!(
                stubs.symbol_file,
                "clang-r522817/lib/clang/18/lib/linux/libclang_rt.hwasan.map.txt"
            );
        }
        let x86 = set.for_target(&TargetSpec::ANDROID_X86).unwrap();
        assert!(x86.source_path.ends_with("/libclang_rt.hwasan-i686-android.so"));
    }

    #[test]
    fn forced_source_build_yields_no_prebuilts() {
        let env = Environment::from_pairs([(FORCE_BUILD_SANITIZER_SHARED_OBJECTS, "true")]);
        let f = Fixture::with(env, StaticProbe::empty());
        let set = f
            .describe(ModuleType::LibclangRtPrebuiltLibraryShared, "prebuilt_libclang_rt.asan")
            .unwrap();
        assert!(set.is_empty());
        // Names are still checked.
        assert!(f
            .describe(ModuleType::LibclangRtPrebuiltLibraryShared, "prebuilt_libfoo")
            .is_err());
    }

    #[test]
    fn unknown_module_names_fail() {
        let f = Fixture::new();
        let cases = [
            (ModuleType::LibclangRtPrebuiltLibraryShared, "libclang_rt.asan"),
            (ModuleType::LibclangRtPrebuiltLibraryStatic, "prebuilt_libunwind"),
            (ModuleType::LibclangRtPrebuiltLibraryStatic, "prebuilt_libclang_rt.builtins.llndk"),
            (ModuleType::LibclangRtPrebuiltLibraryShared, "prebuilt_libclang_rt.llndk"),
            (ModuleType::LibclangRtPrebuiltLibraryShared, "prebuilt_libclang_rt..llndk"),
            (ModuleType::LlvmPrebuiltLibraryStatic, "prebuilt_libomp"),
            (ModuleType::LibclangRtPrebuiltObject, "prebuilt_crtbegin"),
            (ModuleType::LlvmHostPrebuiltLibraryShared, "prebuilt_libfoo"),
            (ModuleType::LlvmDarwinFilegroup, "libfoo_darwin"),
        ];
        for (t, name) in cases {
            let err = f.describe(t, name).unwrap_err();
            let LocatorError::UnknownModule { module_type, .. } = err else {
                panic!("{t} {name}: {err}");
            };
            assert_eq!(module_type, t.name(), "{name}");
        }
    }

    #[test]
    fn static_skips_absent_optional_rows() {
        let f = Fixture::new();
        let set = f
            .describe(ModuleType::LibclangRtPrebuiltLibraryStatic, "prebuilt_libclang_rt.builtins")
            .unwrap();
        assert_eq!(set.len(), 13);
        assert!(set.for_target(&TargetSpec::DARWIN_X86_64).is_none());
        assert!(set.for_target(&TargetSpec::WINDOWS_X86_64).is_none());
        let musl_arm = set.for_target(&TargetSpec::LINUX_MUSL_ARM).unwrap();
        assert!(musl_arm.source_path.ends_with("/libclang_rt.builtins-arm.a"));
    }

    #[test]
    fn static_includes_present_optional_rows() {
        let windows = "clang-r522817/lib/clang/18/lib/windows/libclang_rt.builtins-x86_64.lib";
        let f = Fixture::with(Environment::empty(), StaticProbe::new([windows]));
        let set = f
            .describe(ModuleType::LibclangRtPrebuiltLibraryStatic, "prebuilt_libclang_rt.builtins")
            .unwrap();
        assert_eq!(set.len(), 14);
        assert_eq!(
            set.for_target(&TargetSpec::WINDOWS_X86_64).unwrap().source_path,
            windows
        );
        assert!(set.for_target(&TargetSpec::DARWIN_X86_64).is_none());
    }

    #[test]
    fn objects_use_required_static_rows() {
        let f = Fixture::new();
        let set = f
            .describe(ModuleType::LibclangRtPrebuiltObject, "prebuilt_libclang_rt.crtbegin")
            .unwrap();
        assert_eq!(set.len(), 13);
        assert_eq!(
            set.for_target(&TargetSpec::LINUX_MUSL_X86_64).unwrap().source_path,
            "clang-r522817/musl/lib/x86_64-unknown-linux-musl/lib/linux/clang_rt.crtbegin-x86_64.o"
        );
    }

    #[test]
    fn host_shared_library() {
        let env = Environment::from_pairs([(LLVM_RELEASE_VERSION, "19.1.0")]);
        let f = Fixture::with(env, StaticProbe::empty());
        let set = f
            .describe(ModuleType::LlvmHostPrebuiltLibraryShared, "prebuilt_libclang")
            .unwrap();
        assert_eq!(set.len(), 2);
        let linux = set.for_target(&TargetSpec::GLIBC_X86_64).unwrap();
        assert_eq!(linux.source_path, "clang-r522817/lib/libclang.so.19");
        assert_eq!(
            linux.extra,
            ArtifactExtra::ExportIncludeDirs(vec!["clang-r522817/include".into()])
        );
        let darwin = set.for_target(&TargetSpec::DARWIN_X86_64).unwrap();
        assert_eq!(darwin.source_path, ":libclang_darwin");
        assert_eq!(darwin.extra, ArtifactExtra::ModuleReference);
    }

    #[test]
    fn libcxx_exports_v1_headers() {
        let f = Fixture::new();
        let set = f
            .describe(ModuleType::LlvmHostPrebuiltLibraryShared, "prebuilt_libc++")
            .unwrap();
        let linux = set.for_target(&TargetSpec::GLIBC_X86_64).unwrap();
        assert_eq!(
            linux.extra,
            ArtifactExtra::ExportIncludeDirs(vec!["clang-r522817/include/c++/v1".into()])
        );
    }

    #[test]
    fn llvm_static_library_per_android_arch() {
        let f = Fixture::new();
        let set = f
            .describe(ModuleType::LlvmPrebuiltLibraryStatic, "prebuilt_libFuzzer")
            .unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(
            set.for_target(&TargetSpec::ANDROID_ARM64).unwrap().source_path,
            "clang-r522817/lib/clang/18/lib/linux/aarch64/libFuzzer.a"
        );
        assert_eq!(
            set.for_target(&TargetSpec::ANDROID_X86).unwrap().source_path,
            "clang-r522817/lib/clang/18/lib/linux/i386/libFuzzer.a"
        );
        assert!(set.for_target(&TargetSpec::LINUX_BIONIC_X86_64).is_none());
        for d in &set {
            assert_eq!(
                d.extra,
                ArtifactExtra::ExportIncludeDirs(vec![
                    "clang-r522817/prebuilt_include/llvm/lib/Fuzzer".into()
                ])
            );
        }

        let set = f
            .describe(ModuleType::LlvmPrebuiltLibraryStatic, "prebuilt_libsimpleperf_readelf")
            .unwrap();
        assert_eq!(
            set.for_target(&TargetSpec::ANDROID_RISCV64).unwrap().extra,
            ArtifactExtra::ExportIncludeDirs(vec!["clang-r522817/include".into()])
        );
    }

    #[test]
    fn darwin_filegroup_is_existence_gated() {
        let dylib = "clang-r522817/lib/libc++.dylib";
        let present = Fixture::with(Environment::empty(), StaticProbe::new([dylib]));
        let set = present
            .describe(ModuleType::LlvmDarwinFilegroup, "libc++_darwin")
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.descriptors[0].source_path, dylib);
        assert_eq!(set.descriptors[0].kind, ArtifactKind::FileGroup);

        let absent = Fixture::new();
        let set = absent
            .describe(ModuleType::LlvmDarwinFilegroup, "libc++_darwin")
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn builtin_headers_set() {
        let f = Fixture::new();
        let set = f
            .describe(ModuleType::ClangBuiltinHeaders, "clang_builtin_headers_resources")
            .unwrap();
        assert_eq!(set.len(), 1);
        let d = &set.descriptors[0];
        assert_eq!(d.target, None);
        assert_eq!(d.source_path, "clang-r522817/lib/clang/18/include/**/*.h");
        assert_eq!(
            d.extra,
            ArtifactExtra::Cmd(
                "$(location) prebuilts/clang/host/linux-x86/clang-r522817/lib/clang/18/include $(in) >$(out)"
                    .into()
            )
        );
    }

    #[test]
    fn describe_is_idempotent() {
        let f = Fixture::new();
        for t in ModuleType::ALL {
            let name = match t {
                ModuleType::LlvmHostPrebuiltLibraryShared => "prebuilt_libc++abi",
                ModuleType::LlvmDarwinFilegroup => "libc++abi_darwin",
                ModuleType::LibclangRtPrebuiltObject => "prebuilt_libclang_rt.crtend",
                ModuleType::LlvmPrebuiltLibraryStatic => "prebuilt_libsimpleperf_readelf",
                _ => "prebuilt_libclang_rt.ubsan_standalone",
            };
            let a = f.describe(t, name).unwrap();
            let b = f.describe(t, name).unwrap();
            assert_eq!(a, b, "{t}");
            assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        }
    }
}
