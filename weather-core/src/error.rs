use thiserror::Error;

use crate::provider::ProviderId;

/// Failures of a single location → weather lookup.
///
/// The web handler treats every variant the same way (it falls back to the
/// landing page); the variants exist for logging and for library callers.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Missing or malformed user input, or a provider payload that does not
    /// have the expected shape.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The provider answered with something other than 200, or could not be reached.
    #[error("{message} ({provider})")]
    Provider {
        provider: ProviderId,
        message: String,
    },

    /// The geocoder answered 200 but had no usable first result.
    #[error("Unable to find location information for {0}")]
    NotFound(String),
}

impl LookupError {
    pub(crate) fn provider(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }
}
