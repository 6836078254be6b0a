//! `prebuilts emit` — resolve a manifest of modules as JSON lines.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use prebuilts_locator::{
    CollectingSink, FileProbe, JsonSink, Locator, ModuleManifest, PropertySink, Registry,
};

/// Resolve every module in `manifest_path` and write one JSON object per line
/// to `output`, or to `stdout` when no output path is given.
pub fn run<P: FileProbe>(
    locator: &Locator<P>,
    registry: &Registry,
    manifest_path: &Path,
    output: Option<&Path>,
    stdout: &mut impl Write,
) -> Result<usize> {
    let manifest = ModuleManifest::load(manifest_path)
        .with_context(|| format!("reading {}", manifest_path.display()))?;

    let count = match output {
        Some(path) => {
            // Resolve before touching the output so a failed batch leaves no file.
            let mut collected = CollectingSink::new();
            registry.evaluate_manifest(&manifest, locator, &mut collected)?;
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut sink = JsonSink::new(BufWriter::new(file));
            let n = collected.modules.len();
            for props in collected.modules {
                sink.append(props)?;
            }
            sink.into_inner().flush()?;
            n
        }
        None => {
            let mut sink = JsonSink::new(&mut *stdout);
            registry.evaluate_manifest(&manifest, locator, &mut sink)?
        }
    };
    tracing::info!(modules = count, manifest = %manifest_path.display(), "emitted");
    Ok(count)
}
