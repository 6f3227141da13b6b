use thiserror::Error;

/// Raised when the target of an `@import` rule cannot be determined, either because the
/// identifier is not quoted or because it is empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed @import cannot resolve identifier")]
pub struct MalformedImportError {
    /// The offending prelude, kept for diagnostics
    pub prelude: String,
}

impl MalformedImportError {
    pub(crate) fn new(prelude: &str) -> Self {
        Self { prelude: prelude.to_string() }
    }
}
