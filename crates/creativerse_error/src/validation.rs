//! Validation error types for rejected transitions.

/// Conditions under which a story transition is rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// The operation is not allowed in the controller's current phase
    #[display("Cannot {} while the story is {}", operation, phase)]
    InvalidPhase {
        /// Operation that was attempted
        operation: String,
        /// Phase the controller was in
        phase: String,
    },
    /// Option index outside the current round's option set
    #[display("Option {} does not exist, only {} options are available", index, available)]
    OptionIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of options in the round
        available: usize,
    },
    /// Path reaches deeper than the generated rounds
    #[display("Path of length {} exceeds the {} generated rounds", len, available)]
    PathTooLong {
        /// Length of the requested path
        len: usize,
        /// Rounds generated so far
        available: usize,
    },
    /// One step of a path is outside its round's option set
    #[display("Path step {} selects option {} but round has {} options", depth, index, available)]
    PathIndexOutOfRange {
        /// Zero-based round of the offending step
        depth: usize,
        /// Index at that step
        index: usize,
        /// Options available in that round
        available: usize,
    },
    /// The root has no content to edit or critique
    #[display("The root of the story tree has no chapter")]
    EmptyPath,
    /// An illustration refresh is already running for this node
    #[display("Node {} is already being updated", _0)]
    EditInProgress(String),
    /// Story must have at least one round
    #[display("A story needs at least one round, got {}", _0)]
    InvalidRoundCount(u32),
}

/// Validation error with source location tracking.
///
/// # Examples
///
/// ```
/// use creativerse_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::EmptyPath);
/// assert!(format!("{}", err).contains("root"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`ValidationErrorKind::InvalidPhase`].
    #[track_caller]
    pub fn invalid_phase(operation: impl Into<String>, phase: impl ToString) -> Self {
        Self::new(ValidationErrorKind::InvalidPhase {
            operation: operation.into(),
            phase: phase.to_string(),
        })
    }
}
