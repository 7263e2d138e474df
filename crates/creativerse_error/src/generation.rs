//! Generation gateway error types and retry classification.

/// Generation gateway failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Transport-level failure (connection refused, timeout, reset)
    #[display("Network error: {}", _0)]
    Network(String),
    /// Backend answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Error message reported by the backend
        message: String,
    },
    /// Provider refused the prompt (safety filters, policy)
    #[display("Content rejected by provider: {}", _0)]
    ContentRejected(String),
    /// Response could not be decoded into the expected shape
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
    /// A round came back with the wrong number of options
    #[display("Expected {} options but the generator returned {}", expected, actual)]
    OptionCountMismatch {
        /// Configured options per round
        expected: usize,
        /// Options actually returned
        actual: usize,
    },
    /// Gateway is not configured for the requested operation
    #[display("Gateway misconfigured: {}", _0)]
    Misconfigured(String),
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationErrorKind::Network(_) => true,
            GenerationErrorKind::HttpStatus { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use creativerse_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::HttpStatus {
///     status_code: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
/// assert!(format!("{}", err).contains("503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
