//! The locator: one environment snapshot, one toolchain layout, one probe.

use std::path::Path;

use crate::config::LocatorConfig;
use crate::describe::{describe, DescribeContext};
use crate::descriptor::DescriptorSet;
use crate::env::Environment;
use crate::error::Result;
use crate::module_type::ModuleType;
use crate::paths::PathBuilder;
use crate::probe::{FileProbe, FsProbe};
use crate::properties::ModuleProperties;
use crate::release::{ToolchainRelease, VersionResolver};

/// Resolves modules against a fixed environment snapshot.
///
/// Holds no mutable state: the same locator answers the same request with
/// the same result as long as the probed filesystem does not change.
#[derive(Debug, Clone)]
pub struct Locator<P = FsProbe> {
    env: Environment,
    resolver: VersionResolver,
    base: String,
    module_dir: String,
    probe: P,
}

impl Locator<FsProbe> {
    /// A locator configured from `prebuilts.toml`, probing the real filesystem.
    ///
    /// `config_dir` is the directory the config was found in; the module
    /// directory is resolved against it.
    pub fn from_config(config: &LocatorConfig, config_dir: &Path, env: Environment) -> Self {
        let module_dir = config.module_dir().to_string();
        let probe = FsProbe::new(config_dir.join(&module_dir));
        Self {
            env,
            resolver: config.resolver(),
            base: config.base().to_string(),
            module_dir,
            probe,
        }
    }
}

impl<P: FileProbe> Locator<P> {
    /// A locator with built-in defaults.
    pub fn new(env: Environment, probe: P) -> Self {
        Self {
            env,
            resolver: VersionResolver::default(),
            base: ".".into(),
            module_dir: ".".into(),
            probe,
        }
    }

    /// Set the module directory used in generated commands.
    pub fn with_module_dir(mut self, module_dir: impl Into<String>) -> Self {
        self.module_dir = module_dir.into();
        self
    }

    /// Replace the probe, e.g. after changing the module directory.
    pub fn with_probe<Q: FileProbe>(self, probe: Q) -> Locator<Q> {
        Locator {
            env: self.env,
            resolver: self.resolver,
            base: self.base,
            module_dir: self.module_dir,
            probe,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn module_dir(&self) -> &str {
        &self.module_dir
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn release(&self) -> ToolchainRelease {
        self.resolver.resolve(&self.env)
    }

    pub fn paths(&self) -> PathBuilder {
        PathBuilder::new(&self.base, &self.release())
    }

    /// Describe the artifacts of `module`.
    pub fn describe(&self, module_type: ModuleType, module: &str) -> Result<DescriptorSet> {
        let release = self.release();
        let paths = PathBuilder::new(&self.base, &release);
        let cx = DescribeContext {
            release: &release,
            paths: &paths,
            env: &self.env,
            module_dir: &self.module_dir,
            probe: &self.probe,
        };
        describe(module_type, module, &cx)
    }

    /// Describe `module` and fold the result into its property bag.
    pub fn properties(&self, module_type: ModuleType, module: &str) -> Result<ModuleProperties> {
        let set = self.describe(module_type, module)?;
        let mut props = ModuleProperties::from_descriptors(module_type, &set)?;
        props.apply_toggles(&self.env);
        Ok(props)
    }
}
