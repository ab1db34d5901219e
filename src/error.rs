use thiserror::Error;

/// The ways an operation on a scan set can fail.
///
/// Failures never disturb the set: a rejected slot leaves every flag and the
/// cursor as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ScanError {
    /// The slot index is not below the set's capacity.
    #[error("slot {slot} out of range for capacity {capacity}")]
    OutOfRange {
        /// The rejected slot index.
        slot: usize,
        /// The capacity of the set that rejected it.
        capacity: usize,
    },
    /// A full circuit of the set found no pending slot.
    #[error("no pending slot")]
    Empty,
}
