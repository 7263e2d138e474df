//! Story gallery error types.

/// Kinds of gallery storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the gallery directory
    #[display("Failed to create gallery directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write the gallery file
    #[display("Failed to write gallery: {}", _0)]
    FileWrite(String),
    /// Failed to read the gallery file
    #[display("Failed to read gallery: {}", _0)]
    FileRead(String),
    /// Gallery contents could not be (de)serialized
    #[display("Gallery serialization failed: {}", _0)]
    Serialization(String),
    /// No story with this id
    #[display("Story not found: {}", _0)]
    NotFound(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use creativerse_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("story-42".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
