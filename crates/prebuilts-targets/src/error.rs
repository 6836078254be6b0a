//! Error types for target model operations.

/// Errors that can occur while parsing or looking up targets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The string does not name a known OS/architecture pair.
    #[error("unrecognized target '{input}'")]
    Unrecognized {
        /// The rejected input.
        input: String,
    },

    /// The target is well-formed but absent from the requested table.
    #[error("target '{target}' is not supported by the {table} table")]
    Unsupported {
        /// Property key of the target.
        target: String,
        /// Name of the table that was consulted.
        table: &'static str,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
