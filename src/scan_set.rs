use core::fmt::{Debug, Formatter};

use crate::bitmap::{BitMap, IterOnes};
use crate::error::ScanError;

/// A fixed-capacity set of pending slots with round-robin retrieval.
///
/// `SLOTS` is the number of addressable slots, `0..SLOTS`. `BUCKETS` is the
/// number of internal buckets and should only be set via const expression
/// with [`bucket_count`]; any other value, or `SLOTS == 0`, fails the build.
///
/// Each slot is either pending or idle. Pushing a pending slot again changes
/// nothing. Retrieval scans from a cursor that moves past every consumed slot,
/// so repeated [`pop_front`] calls visit pending slots in circular order
/// instead of always favoring the lowest index. [`push_front`] moves the
/// cursor onto a slot so that it is retrieved next.
///
/// The set is meant for a single owner. Use
/// [`GuardedBitScanSet`](crate::GuardedBitScanSet) to share one between
/// threads.
///
/// # Examples
/// ```
/// use bitscan_deque::{bucket_count, BitScanSet};
///
/// let mut set = BitScanSet::<8, { bucket_count(8) }>::new();
/// set.push_back(2).unwrap();
/// set.push_back(6).unwrap();
/// set.push_front(4).unwrap();
///
/// assert_eq!(set.front(), Some(4));
/// set.pop_front().unwrap();
/// assert_eq!(set.front(), Some(6));
/// set.pop_front().unwrap();
/// assert_eq!(set.front(), Some(2));
/// ```
///
/// A zero capacity is rejected at compile time:
/// ```compile_fail
/// use bitscan_deque::{bucket_count, BitScanSet};
///
/// let set = BitScanSet::<0, { bucket_count(0) }>::new();
/// ```
///
/// So is a bucket count that does not fit the capacity:
/// ```compile_fail
/// use bitscan_deque::BitScanSet;
///
/// let set = BitScanSet::<20, 2>::new();
/// ```
///
/// [`bucket_count`]: crate::bucket_count
/// [`pop_front`]: BitScanSet::pop_front
/// [`push_front`]: BitScanSet::push_front
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct BitScanSet<const SLOTS: usize, const BUCKETS: usize> {
    flags: BitMap<SLOTS, BUCKETS>,
    // always < SLOTS
    cursor: usize,
}

impl<const SLOTS: usize, const BUCKETS: usize> BitScanSet<SLOTS, BUCKETS> {
    /// Creates an empty set with the cursor on slot 0.
    ///
    /// Usable in `const` and `static` initializers.
    ///
    /// # Examples
    /// ```
    /// use bitscan_deque::{bucket_count, BitScanSet};
    ///
    /// let set = BitScanSet::<16, { bucket_count(16) }>::new();
    /// assert!(set.empty());
    /// assert_eq!(set.cursor(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            flags: BitMap::new(),
            cursor: 0,
        }
    }

    /// Returns the number of addressable slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        SLOTS
    }

    /// Returns the slot at which the next scan starts.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    fn check_slot(slot: usize) -> Result<(), ScanError> {
        if slot < SLOTS {
            return Ok(());
        }
        log::trace!("rejecting slot {slot}, capacity is {SLOTS}");
        Err(ScanError::OutOfRange {
            slot,
            capacity: SLOTS,
        })
    }

    /// Marks `slot` pending and makes it the next slot to be retrieved.
    ///
    /// The cursor moves onto `slot` even if it was already pending.
    ///
    /// # Errors
    /// Returns [`ScanError::OutOfRange`] if `slot >= SLOTS`, leaving the set
    /// untouched.
    ///
    /// # Examples
    /// ```
    /// use bitscan_deque::{bucket_count, BitScanSet};
    ///
    /// let mut set = BitScanSet::<8, { bucket_count(8) }>::new();
    /// set.push_back(1).unwrap();
    /// set.push_front(7).unwrap();
    /// assert_eq!(set.front(), Some(7));
    /// assert!(set.push_front(8).is_err());
    /// ```
    pub fn push_front(&mut self, slot: usize) -> Result<(), ScanError> {
        Self::check_slot(slot)?;
        self.flags.set(slot);
        log::trace!("slot {slot} escalated, cursor {} -> {slot}", self.cursor);
        self.cursor = slot;
        Ok(())
    }

    /// Marks `slot` pending without moving the cursor.
    ///
    /// # Errors
    /// Returns [`ScanError::OutOfRange`] if `slot >= SLOTS`, leaving the set
    /// untouched.
    ///
    /// # Examples
    /// ```
    /// use bitscan_deque::{bucket_count, BitScanSet};
    ///
    /// let mut set = BitScanSet::<8, { bucket_count(8) }>::new();
    /// set.push_back(3).unwrap();
    /// set.push_back(3).unwrap();
    /// assert_eq!(set.size(), 1);
    /// ```
    pub fn push_back(&mut self, slot: usize) -> Result<(), ScanError> {
        Self::check_slot(slot)?;
        self.flags.set(slot);
        Ok(())
    }

    /// Returns `true` if `slot` is pending. Out-of-range slots are never
    /// pending.
    #[inline]
    pub fn is_set(&self, slot: usize) -> bool {
        slot < SLOTS && self.flags.is_set(slot)
    }

    /// Returns the next pending slot in scan order without consuming it, or
    /// `None` if no slot is pending.
    ///
    /// The cursor skips over idle slots and stops on the returned one, so a
    /// following [`pop_front`](Self::pop_front) consumes that same slot. When
    /// nothing is pending the cursor ends where it started.
    ///
    /// # Examples
    /// ```
    /// use bitscan_deque::{bucket_count, BitScanSet};
    ///
    /// let mut set = BitScanSet::<8, { bucket_count(8) }>::new();
    /// assert_eq!(set.front(), None);
    /// set.push_back(5).unwrap();
    /// assert_eq!(set.front(), Some(5));
    /// assert!(set.is_set(5));
    /// ```
    pub fn front(&mut self) -> Option<usize> {
        let slot = self.scan()?;
        self.cursor = slot;
        Some(slot)
    }

    /// Consumes the next pending slot in scan order.
    ///
    /// The cursor moves to the slot after the consumed one, wrapping to 0
    /// past the last slot.
    ///
    /// # Errors
    /// Returns [`ScanError::Empty`] if no slot is pending; the cursor is left
    /// where it was.
    ///
    /// # Examples
    /// ```
    /// use bitscan_deque::{bucket_count, BitScanSet, ScanError};
    ///
    /// let mut set = BitScanSet::<4, { bucket_count(4) }>::new();
    /// set.push_back(3).unwrap();
    /// assert_eq!(set.pop_front(), Ok(()));
    /// assert_eq!(set.cursor(), 0);
    /// assert_eq!(set.pop_front(), Err(ScanError::Empty));
    /// ```
    pub fn pop_front(&mut self) -> Result<(), ScanError> {
        let slot = self.scan().ok_or(ScanError::Empty)?;
        self.flags.unset(slot);
        self.cursor = (slot + 1) % SLOTS;
        Ok(())
    }

    // At most one circuit, starting on the cursor.
    #[inline]
    fn scan(&self) -> Option<usize> {
        self.flags.next_set_bit_wrapping(self.cursor)
    }

    /// Returns `true` if no slot is pending.
    #[inline]
    pub fn empty(&self) -> bool {
        self.flags.none()
    }

    /// Marks every slot idle. The cursor is left where it is.
    #[inline]
    pub fn clear(&mut self) {
        self.flags.clear();
    }

    /// Returns the number of pending slots.
    #[inline]
    pub fn size(&self) -> usize {
        self.flags.popcount()
    }

    /// Returns an iterator over the pending slots in ascending order.
    ///
    /// # Examples
    /// ```
    /// use bitscan_deque::{bucket_count, BitScanSet};
    ///
    /// let mut set = BitScanSet::<12, { bucket_count(12) }>::new();
    /// set.push_back(9).unwrap();
    /// set.push_front(1).unwrap();
    /// let mut slots = set.iter();
    /// assert_eq!(slots.next(), Some(1));
    /// assert_eq!(slots.next(), Some(9));
    /// assert_eq!(slots.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> IterOnes<'_, SLOTS, BUCKETS> {
        self.flags.iter_ones()
    }
}

impl<const SLOTS: usize, const BUCKETS: usize> Default for BitScanSet<SLOTS, BUCKETS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'set, const SLOTS: usize, const BUCKETS: usize> IntoIterator
    for &'set BitScanSet<SLOTS, BUCKETS>
{
    type Item = usize;
    type IntoIter = IterOnes<'set, SLOTS, BUCKETS>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

struct Pending<'set, const SLOTS: usize, const BUCKETS: usize>(&'set BitScanSet<SLOTS, BUCKETS>);

impl<const SLOTS: usize, const BUCKETS: usize> Debug for Pending<'_, SLOTS, BUCKETS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

impl<const SLOTS: usize, const BUCKETS: usize> Debug for BitScanSet<SLOTS, BUCKETS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BitScanSet")
            .field("cursor", &self.cursor)
            .field("pending", &Pending(self))
            .finish()
    }
}
