//! Time source seam.

use crate::domain::Timestamp;

/// Current-time source for deposit timestamps and yield age.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}
