//! Error types for the Creativerse branching-story engine.
//!
//! # Error Hierarchy
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with the source location that raised it
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! The three kinds the story engine cares about most:
//!
//! - [`GenerationError`] — the generation gateway failed (network, provider,
//!   malformed output). Recoverable at the controller boundary.
//! - [`ValidationError`] — a transition was attempted with a bad index, path or
//!   in the wrong phase. Raised before anything is mutated.
//! - [`StaleResponseError`] — a gateway response arrived for a timeline that no
//!   longer exists. Internal only, never shown to users.
//!
//! # Examples
//!
//! ```
//! use creativerse_error::{CreativerseResult, ValidationError, ValidationErrorKind};
//!
//! fn pick(index: usize, available: usize) -> CreativerseResult<usize> {
//!     if index >= available {
//!         Err(ValidationError::new(ValidationErrorKind::OptionIndexOutOfRange {
//!             index,
//!             available,
//!         }))?
//!     }
//!     Ok(index)
//! }
//!
//! assert!(pick(4, 3).is_err());
//! assert_eq!(pick(1, 3).unwrap(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod generation;
mod stale;
mod storage;
mod validation;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{CreativerseError, CreativerseErrorKind, CreativerseResult};
pub use generation::{GenerationError, GenerationErrorKind, RetryableError};
pub use stale::StaleResponseError;
pub use storage::{StorageError, StorageErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
