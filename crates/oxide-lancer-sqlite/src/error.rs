//! Error types for pragma configuration.

use crate::pragma::Pragma;

/// Errors raised while configuring the pragma generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PragmaError {
    /// The name is not a known pragma.
    #[error("Unknown pragma '{0}'")]
    Unknown(String),

    /// The pragma exists but is never generated.
    #[error("Pragma '{name}' is never generated: {reason}")]
    Excluded {
        /// The pragma name.
        name: String,
        /// Why it is left out.
        reason: &'static str,
    },

    /// The options enable no pragma at all.
    #[error("At least one pragma must be enabled")]
    EmptyDirectiveSet,

    /// A pragma is listed twice in the options.
    #[error("Pragma '{0}' is enabled more than once")]
    DuplicateDirective(Pragma),
}

/// Result type for pragma configuration.
pub type Result<T> = std::result::Result<T, PragmaError>;
