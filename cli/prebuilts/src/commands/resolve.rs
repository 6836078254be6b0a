//! `prebuilts resolve` — print the property bag of one module.

use std::io::Write;

use anyhow::{bail, Context, Result};
use prebuilts_locator::{FileProbe, Locator, Registry};

/// Resolve `name` as a `type_name` module and print its properties.
pub fn run<P: FileProbe>(
    locator: &Locator<P>,
    registry: &Registry,
    type_name: &str,
    name: &str,
    format: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let props = registry
        .resolve(type_name, name, locator)
        .with_context(|| format!("resolving {type_name} '{name}'"))?;

    let rendered = match format.unwrap_or("json") {
        "json" => serde_json::to_string_pretty(&props)?,
        "toml" => toml::to_string_pretty(&props)?,
        other => bail!("unknown format '{other}' (expected json or toml)"),
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}
