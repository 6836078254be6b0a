//! `prebuilts doctor` — configuration and toolchain diagnostics.

use std::io::Write;

use anyhow::Result;
use prebuilts_locator::env::{
    FORCE_BUILD_SANITIZER_SHARED_OBJECTS, LLVM_BUILD_HOST_TOOLS, LLVM_PREBUILTS_VERSION,
    LLVM_RELEASE_VERSION,
};
use prebuilts_locator::{FileProbe, Locator};

use crate::workspace::Workspace;

/// Print the resolved release, the toolchain layout, and what exists on disk.
pub fn run<P: FileProbe>(
    workspace: &Workspace,
    locator: &Locator<P>,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "=== Prebuilts Doctor ===")?;
    writeln!(out)?;
    writeln!(out, "prebuilts version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out)?;

    writeln!(out, "--- Configuration ---")?;
    match &workspace.config_path {
        Some(path) => writeln!(out, "  {}: {}", prebuilts_locator::CONFIG_FILE, path.display())?,
        None => writeln!(
            out,
            "  {}: not found (built-in defaults)",
            prebuilts_locator::CONFIG_FILE
        )?,
    }
    writeln!(out, "  Module dir: {}", locator.module_dir())?;
    writeln!(out)?;

    writeln!(out, "--- Environment ---")?;
    let env = locator.env();
    for key in [
        LLVM_PREBUILTS_VERSION,
        LLVM_RELEASE_VERSION,
        LLVM_BUILD_HOST_TOOLS,
        FORCE_BUILD_SANITIZER_SHARED_OBJECTS,
    ] {
        writeln!(out, "  {key:<38} {}", env.get(key).unwrap_or("(unset)"))?;
    }
    writeln!(out)?;

    let release = locator.release();
    let paths = locator.paths();
    writeln!(out, "--- Toolchain ---")?;
    writeln!(out, "  Version:  {}", release.version())?;
    writeln!(out, "  Release:  {} (major {})", release.short_version(), release.major())?;
    for (label, dir) in [
        ("Root", paths.root().to_string()),
        ("Lib", paths.lib_dir()),
        ("Resource", paths.resource_dir()),
        ("Headers", paths.builtin_headers_dir()),
    ] {
        let status = if locator.probe().exists(&dir) { "ok" } else { "missing" };
        writeln!(out, "  {label:<9} {dir} [{status}]")?;
    }
    Ok(())
}
