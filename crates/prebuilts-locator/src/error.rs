//! Locator error types.

use std::path::PathBuf;

use prebuilts_targets::TargetError;

/// Errors that can occur while resolving prebuilt artifacts.
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    /// The module name does not follow the naming convention of its type.
    #[error("unsupported {module_type} module '{name}': {reason}")]
    UnknownModule {
        module_type: &'static str,
        name: String,
        reason: String,
    },

    /// No module type is registered under this name.
    #[error("unknown module type: {0}")]
    UnknownModuleType(String),

    /// A module type was registered twice.
    #[error("module type '{0}' already registered")]
    DuplicateModuleType(String),

    /// A computed descriptor set failed validation.
    #[error("invalid descriptor for '{name}': {detail}")]
    InvalidDescriptor { name: String, detail: String },

    /// Target lookup failed.
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Configuration file could not be parsed.
    #[error("config error in {}: {detail}", path.display())]
    Config { path: PathBuf, detail: String },

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocatorError {
    pub(crate) fn unknown_module(
        module_type: &'static str,
        name: &str,
        reason: impl Into<String>,
    ) -> Self {
        LocatorError::UnknownModule {
            module_type,
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for locator operations.
pub type Result<T> = std::result::Result<T, LocatorError>;
