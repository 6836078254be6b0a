//! Locating `prebuilts.toml` and building a locator from it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prebuilts_locator::{Environment, FsProbe, Locator, LocatorConfig};

/// Configuration in effect for a command, and where it came from.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub config: LocatorConfig,
    /// Directory containing `prebuilts.toml`, or the working directory.
    pub root: PathBuf,
    /// Path of the loaded config file, if one was found.
    pub config_path: Option<PathBuf>,
}

impl Workspace {
    /// Search upward from `cwd`; fall back to built-in defaults rooted at `cwd`.
    pub fn discover(cwd: &Path) -> Result<Self> {
        let found = LocatorConfig::find_and_load(cwd).with_context(|| {
            format!("loading {} from {}", prebuilts_locator::CONFIG_FILE, cwd.display())
        })?;
        Ok(match found {
            Some((config, root)) => Workspace {
                config_path: Some(root.join(prebuilts_locator::CONFIG_FILE)),
                config,
                root,
            },
            None => Workspace {
                config: LocatorConfig::default(),
                root: cwd.to_path_buf(),
                config_path: None,
            },
        })
    }

    /// Locator over `env`, optionally with a module directory that overrides
    /// the configured one. The override is relative to the workspace root.
    pub fn locator(&self, env: Environment, module_dir: Option<&str>) -> Locator<FsProbe> {
        let locator = Locator::from_config(&self.config, &self.root, env);
        match module_dir {
            Some(dir) => locator
                .with_module_dir(dir)
                .with_probe(FsProbe::new(self.root.join(dir))),
            None => locator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::discover(dir.path()).unwrap();
        assert!(ws.config_path.is_none());
        assert_eq!(ws.root, dir.path());
        let locator = ws.locator(Environment::empty(), None);
        assert_eq!(locator.module_dir(), ".");
    }

    #[test]
    fn discover_with_config_and_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(prebuilts_locator::CONFIG_FILE),
            "[resolve]\nmodule-dir = \"prebuilts/clang\"\n",
        )
        .unwrap();
        let ws = Workspace::discover(dir.path()).unwrap();
        assert_eq!(ws.root, dir.path());
        assert_eq!(ws.locator(Environment::empty(), None).module_dir(), "prebuilts/clang");

        let locator = ws.locator(Environment::empty(), Some("other"));
        assert_eq!(locator.module_dir(), "other");
        assert_eq!(locator.probe().module_dir(), dir.path().join("other"));
    }
}
