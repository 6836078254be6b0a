//! `prebuilts targets` — list architecture table rows with their resolved directories.

use std::io::Write;

use anyhow::{bail, Result};
use prebuilts_locator::PathBuilder;
use prebuilts_targets::ArchitectureTable;

/// Print the rows of one table, or of every table when `table` is `None`.
pub fn run(paths: &PathBuilder, table: Option<&str>, out: &mut impl Write) -> Result<()> {
    let tables = match table {
        None => ArchitectureTable::ALL.to_vec(),
        Some(name) => match ArchitectureTable::by_name(name) {
            Some(t) => vec![t],
            None => bail!("unknown table '{name}' (expected shared, static or per-arch)"),
        },
    };

    for (i, t) in tables.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{} table:", t.name())?;
        for e in t.entries() {
            writeln!(
                out,
                "  {:<22} {:<18} {}{}",
                e.target.property_key(),
                e.suffix,
                paths.location_dir(e.location),
                if e.optional { "  (optional)" } else { "" }
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use prebuilts_locator::ToolchainRelease;

    use super::*;

    fn paths() -> PathBuilder {
        PathBuilder::new(".", &ToolchainRelease::new("clang-r1", "18"))
    }

    #[test]
    fn lists_every_table() {
        let mut out = Vec::new();
        run(&paths(), None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("dynamic table:"));
        assert!(text.contains("static table:"));
        assert!(text.contains("per-arch table:"));
        assert!(text.contains("clang-r1/lib/clang/18/lib/linux/aarch64"));
        assert!(text.contains("arm-unknown-linux-musleabihf"));
        assert!(text.contains("optional"));
    }

    #[test]
    fn lists_one_table() {
        let mut out = Vec::new();
        run(&paths(), Some("shared"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("static table:"));
        assert!(!text.contains("windows_x86_64"));
    }

    #[test]
    fn unknown_table() {
        let mut out = Vec::new();
        assert!(run(&paths(), Some("fat"), &mut out).is_err());
    }
}
