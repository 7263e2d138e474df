//! Stale gateway response marker.

/// A gateway response arrived for a timeline epoch that no longer exists.
///
/// Produced when a reset or branch switch happens while a request is in
/// flight. The controller logs and drops it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Stale response for epoch {} (current epoch {})", issued, current)]
pub struct StaleResponseError {
    /// Epoch the request was issued against
    pub issued: u64,
    /// Epoch of the timeline when the response arrived
    pub current: u64,
}

impl StaleResponseError {
    /// Compare an issued epoch against the current one.
    ///
    /// # Examples
    ///
    /// ```
    /// use creativerse_error::StaleResponseError;
    ///
    /// assert!(StaleResponseError::check(3, 3).is_ok());
    /// assert!(StaleResponseError::check(2, 3).is_err());
    /// ```
    pub fn check(issued: u64, current: u64) -> Result<(), Self> {
        if issued == current {
            Ok(())
        } else {
            Err(Self { issued, current })
        }
    }
}
