//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GenerationError, StorageError, ValidationError};

/// Every error a Creativerse operation can surface to its caller.
///
/// [`crate::StaleResponseError`] is deliberately absent: stale responses are
/// dropped inside the controller and never reach a caller.
///
/// # Examples
///
/// ```
/// use creativerse_error::{CreativerseError, CreativerseErrorKind, GenerationError, GenerationErrorKind};
///
/// let err: CreativerseError = GenerationError::new(GenerationErrorKind::Network("reset".into())).into();
/// assert!(matches!(err.kind(), CreativerseErrorKind::Generation(_)));
/// assert!(format!("{}", err).contains("reset"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CreativerseErrorKind {
    /// Generation gateway failure
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Rejected transition or out-of-range address
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Story gallery failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Creativerse error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Creativerse Error: {}", _0)]
pub struct CreativerseError(Box<CreativerseErrorKind>);

impl CreativerseError {
    /// Create a new error from a kind.
    pub fn new(kind: CreativerseErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CreativerseErrorKind {
        &self.0
    }

    /// Whether this error came from the generation gateway.
    pub fn is_generation(&self) -> bool {
        matches!(self.kind(), CreativerseErrorKind::Generation(_))
    }

    /// Whether this error is a rejected transition.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), CreativerseErrorKind::Validation(_))
    }

    /// The message shown to a user in an error banner.
    ///
    /// Location details are stripped; only the kind's description remains.
    pub fn user_message(&self) -> String {
        match self.kind() {
            CreativerseErrorKind::Generation(e) => e.kind.to_string(),
            CreativerseErrorKind::Validation(e) => e.kind.to_string(),
            CreativerseErrorKind::Storage(e) => e.kind.to_string(),
            CreativerseErrorKind::Config(e) => e.message.clone(),
            CreativerseErrorKind::Builder(e) => e.kind().to_string(),
        }
    }
}

// Generic From implementation for any type that converts to CreativerseErrorKind
impl<T> From<T> for CreativerseError
where
    T: Into<CreativerseErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Creativerse operations.
pub type CreativerseResult<T> = std::result::Result<T, CreativerseError>;
