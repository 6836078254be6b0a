//! `prebuilts describe` — human-readable descriptor table.

use std::io::Write;

use anyhow::{Context, Result};
use prebuilts_locator::{ArtifactExtra, FileProbe, Locator, Registry};

/// Print one line per descriptor plus the set fingerprint.
pub fn run<P: FileProbe>(
    locator: &Locator<P>,
    registry: &Registry,
    type_name: &str,
    name: &str,
    out: &mut impl Write,
) -> Result<()> {
    let module_type = registry.lookup(type_name)?;
    let set = locator
        .describe(module_type, name)
        .with_context(|| format!("describing {type_name} '{name}'"))?;

    writeln!(out, "=== {name} ({module_type}) ===")?;
    if let Some(kind) = module_type.kind() {
        writeln!(out, "Kind: {kind}")?;
    }
    writeln!(out, "Toolchain: {}", locator.paths().root())?;
    writeln!(out)?;

    if set.is_empty() {
        writeln!(out, "  (no artifacts)")?;
    }
    for d in &set {
        let target = d.target_key().unwrap_or_else(|| "(any)".into());
        write!(out, "  {target:<22} {}", d.source_path)?;
        if let Some(stem) = &d.output_stem {
            write!(out, "  [stem {stem}]")?;
        }
        writeln!(out)?;
    }

    let mut notes = set.iter().filter_map(|d| match &d.extra {
        ArtifactExtra::Stubs(stubs) => Some(format!(
            "stubs: {} (versions {})",
            stubs.symbol_file,
            stubs.versions.join(", ")
        )),
        ArtifactExtra::ExportIncludeDirs(dirs) => Some(format!("exports: {}", dirs.join(", "))),
        ArtifactExtra::Cmd(cmd) => Some(format!("cmd: {cmd}")),
        ArtifactExtra::None | ArtifactExtra::ModuleReference => None,
    });
    if let Some(note) = notes.next() {
        writeln!(out)?;
        writeln!(out, "  {note}")?;
    }

    writeln!(out)?;
    writeln!(out, "Fingerprint: {}", set.fingerprint()?)?;
    Ok(())
}
