//! Module type registration and evaluation.
//!
//! A host registers the module types it understands, then asks the registry
//! to evaluate modules by type name. Evaluation is all-or-nothing: a batch
//! that contains one bad module emits nothing.

use std::collections::BTreeMap;

use crate::config::ModuleManifest;
use crate::emit::PropertySink;
use crate::error::{LocatorError, Result};
use crate::locator::Locator;
use crate::module_type::ModuleType;
use crate::probe::FileProbe;
use crate::properties::ModuleProperties;

/// Maps registered type names to module types.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: BTreeMap<String, ModuleType>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in module type under its own name.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        for t in ModuleType::ALL {
            registry.types.insert(t.name().to_string(), t);
        }
        registry
    }

    /// Register `module_type` under `name`.
    pub fn register(&mut self, name: impl Into<String>, module_type: ModuleType) -> Result<()> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(LocatorError::DuplicateModuleType(name));
        }
        tracing::debug!(%name, module_type = module_type.name(), "registered module type");
        self.types.insert(name, module_type);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<ModuleType> {
        self.types
            .get(name)
            .copied()
            .ok_or_else(|| LocatorError::UnknownModuleType(name.to_string()))
    }

    /// Registered names with their types, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ModuleType)> {
        self.types.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Compute the property bag for one module without emitting it.
    pub fn resolve<P: FileProbe>(
        &self,
        type_name: &str,
        module: &str,
        locator: &Locator<P>,
    ) -> Result<ModuleProperties> {
        let module_type = self.lookup(type_name)?;
        locator.properties(module_type, module)
    }

    /// Resolve one module and hand its properties to `sink`.
    pub fn evaluate<P: FileProbe, S: PropertySink>(
        &self,
        type_name: &str,
        module: &str,
        locator: &Locator<P>,
        sink: &mut S,
    ) -> Result<()> {
        let props = self.resolve(type_name, module, locator)?;
        sink.append(props)
    }

    /// Resolve every module in `manifest`, then emit them in order.
    ///
    /// Nothing is emitted unless every module resolves.
    pub fn evaluate_manifest<P: FileProbe, S: PropertySink>(
        &self,
        manifest: &ModuleManifest,
        locator: &Locator<P>,
        sink: &mut S,
    ) -> Result<usize> {
        let bags = manifest
            .modules
            .iter()
            .map(|m| self.resolve(&m.module_type, &m.name, locator))
            .collect::<Result<Vec<_>>>()?;
        let count = bags.len();
        for props in bags {
            sink.append(props)?;
        }
        Ok(count)
    }
}
