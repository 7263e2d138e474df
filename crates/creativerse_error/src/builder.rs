//! Errors from `derive_builder` builders.

/// Why a builder refused to build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set
    #[display("Missing required field: {}", _0)]
    MissingField(String),

    /// A builder validation hook rejected the values
    #[display("Invalid value: {}", _0)]
    Invalid(String),
}

/// Builder error with location tracking.
///
/// Each builder in the workspace converts its generated error type into this
/// one, so `.build().map_err(BuilderError::from)?` works anywhere a
/// [`CreativerseResult`](crate::CreativerseResult) is returned.
///
/// # Examples
///
/// ```
/// use creativerse_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::missing("prompt");
/// assert_eq!(err.kind(), &BuilderErrorKind::MissingField("prompt".into()));
/// assert!(format!("{}", err).contains("prompt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A required field was left unset.
    #[track_caller]
    pub fn missing(field: &str) -> Self {
        Self::new(BuilderErrorKind::MissingField(field.to_string()))
    }

    /// The builder's validation rejected its values.
    #[track_caller]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::new(BuilderErrorKind::Invalid(reason.into()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}
