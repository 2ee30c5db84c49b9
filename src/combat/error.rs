//! Combat input errors

use thiserror::Error;

/// Errors raised for bad combat input
///
/// Every variant is a deterministic function of the input; nothing here is
/// transient or worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("malformed dice notation: '{0}'")]
    MalformedNotation(String),

    #[error("invalid {field}: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },
}

impl CombatError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        CombatError::InvalidArgument {
            field,
            message: message.into(),
        }
    }
}
