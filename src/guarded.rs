use core::fmt::{Debug, Formatter};

use spin::Mutex;

use crate::error::ScanError;
use crate::scan_set::BitScanSet;

/// A [`BitScanSet`] behind a spin lock, shareable between threads.
///
/// Every operation takes the lock for its own duration and releases it on
/// return, so no call ever observes a half-applied update from another.
/// Nothing is atomic across calls, though: after [`front`] reports slot `x`,
/// another thread may consume `x` before this thread's [`pop_front`] runs, in
/// which case that `pop_front` consumes a different slot or finds the set
/// empty. Treat `front` as a hint when the set is shared.
///
/// The lock is not reentrant and is never held across calls.
///
/// # Examples
/// ```
/// use bitscan_deque::{bucket_count, GuardedBitScanSet};
///
/// static READY: GuardedBitScanSet<52, { bucket_count(52) }> = GuardedBitScanSet::new();
///
/// READY.push_back(2).unwrap();
/// READY.push_front(3).unwrap();
/// READY.push_front(49).unwrap();
///
/// assert_eq!(READY.front(), Some(49));
/// READY.pop_front().unwrap();
/// assert_eq!(READY.front(), Some(2));
/// assert_eq!(READY.size(), 2);
/// ```
///
/// [`front`]: GuardedBitScanSet::front
/// [`pop_front`]: GuardedBitScanSet::pop_front
pub struct GuardedBitScanSet<const SLOTS: usize, const BUCKETS: usize> {
    set: Mutex<BitScanSet<SLOTS, BUCKETS>>,
}

impl<const SLOTS: usize, const BUCKETS: usize> GuardedBitScanSet<SLOTS, BUCKETS> {
    /// Creates an empty set with the cursor on slot 0.
    ///
    /// Usable in `const` and `static` initializers.
    pub const fn new() -> Self {
        Self {
            set: Mutex::new(BitScanSet::new()),
        }
    }

    /// Wraps an existing set.
    pub const fn from_set(set: BitScanSet<SLOTS, BUCKETS>) -> Self {
        Self {
            set: Mutex::new(set),
        }
    }

    /// Returns the number of addressable slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        SLOTS
    }

    /// Returns the slot at which the next scan starts.
    pub fn cursor(&self) -> usize {
        self.set.lock().cursor()
    }

    /// Locked [`BitScanSet::push_front`].
    ///
    /// # Errors
    /// Returns [`ScanError::OutOfRange`] if `slot >= SLOTS`.
    pub fn push_front(&self, slot: usize) -> Result<(), ScanError> {
        self.set.lock().push_front(slot)
    }

    /// Locked [`BitScanSet::push_back`].
    ///
    /// # Errors
    /// Returns [`ScanError::OutOfRange`] if `slot >= SLOTS`.
    pub fn push_back(&self, slot: usize) -> Result<(), ScanError> {
        self.set.lock().push_back(slot)
    }

    /// Locked [`BitScanSet::is_set`].
    pub fn is_set(&self, slot: usize) -> bool {
        // out-of-range slots need no look at the flags
        slot < SLOTS && self.set.lock().is_set(slot)
    }

    /// Locked [`BitScanSet::front`].
    ///
    /// The result may already be stale when this returns.
    pub fn front(&self) -> Option<usize> {
        self.set.lock().front()
    }

    /// Locked [`BitScanSet::pop_front`].
    ///
    /// # Errors
    /// Returns [`ScanError::Empty`] if no slot is pending.
    pub fn pop_front(&self) -> Result<(), ScanError> {
        self.set.lock().pop_front()
    }

    /// Locked [`BitScanSet::empty`].
    pub fn empty(&self) -> bool {
        self.set.lock().empty()
    }

    /// Locked [`BitScanSet::clear`].
    pub fn clear(&self) {
        self.set.lock().clear()
    }

    /// Locked [`BitScanSet::size`].
    pub fn size(&self) -> usize {
        self.set.lock().size()
    }

    /// Returns the inner set without locking, since `&mut self` already rules
    /// out other users.
    pub fn get_mut(&mut self) -> &mut BitScanSet<SLOTS, BUCKETS> {
        self.set.get_mut()
    }

    /// Consumes the wrapper and returns the inner set.
    pub fn into_inner(self) -> BitScanSet<SLOTS, BUCKETS> {
        self.set.into_inner()
    }
}

impl<const SLOTS: usize, const BUCKETS: usize> Default for GuardedBitScanSet<SLOTS, BUCKETS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SLOTS: usize, const BUCKETS: usize> From<BitScanSet<SLOTS, BUCKETS>>
    for GuardedBitScanSet<SLOTS, BUCKETS>
{
    fn from(set: BitScanSet<SLOTS, BUCKETS>) -> Self {
        Self::from_set(set)
    }
}

impl<const SLOTS: usize, const BUCKETS: usize> Debug for GuardedBitScanSet<SLOTS, BUCKETS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut d = f.debug_struct("GuardedBitScanSet");
        match self.set.try_lock() {
            Some(set) => d.field("set", &*set),
            None => d.field("set", &format_args!("<locked>")),
        };
        d.finish()
    }
}
