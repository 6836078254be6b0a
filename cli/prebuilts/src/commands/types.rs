//! `prebuilts types` — list registered module types.

use std::io::Write;

use anyhow::Result;
use prebuilts_locator::Registry;

pub fn run(registry: &Registry, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Registered module types:")?;
    writeln!(out)?;
    for (name, module_type) in registry.iter() {
        writeln!(out, "  {name:<38} {}", module_type.description())?;
    }
    Ok(())
}
