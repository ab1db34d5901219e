use core::iter::{FusedIterator, Iterator};

/// Computes the number of buckets needed to store `slot_count` slots.
///
/// It's recommended to inline this call as a const expression into the type
/// annotation generics.
///
/// # Examples
/// ```
/// use bitscan_deque::bucket_count;
///
/// assert_eq!(bucket_count(9), 2);
/// assert_eq!(bucket_count(16), 2);
/// assert_eq!(bucket_count(17), 3);
/// ```
pub const fn bucket_count(slot_count: usize) -> usize {
    slot_count.div_ceil(8)
}

pub(crate) const fn compile_assert_const_params(bit_count: usize, buckets: usize) {
    assert!(bit_count != 0, "SLOTS must be greater than zero.");
    assert!(
        bucket_count(bit_count) == buckets,
        "BUCKETS must match bucket_count(SLOTS)."
    );
}

pub(crate) const fn ones_mask(start_bit: usize, width: usize) -> u8 {
    if width >= 8 {
        // shift would be undefined / panic on u8
        !0u8
    } else {
        // if `1u8 << shift_amount` == 0 wrap around
        (1u8 << width).wrapping_sub(1) << start_bit
    }
}

/// Packed flag storage backing the scan sets.
///
/// Bits beyond `BIT_COUNT` in the last bucket are never set, since every
/// write goes through a validated index.
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
pub(crate) struct BitMap<const BIT_COUNT: usize, const BUCKET_COUNT: usize>(
    pub(crate) [u8; BUCKET_COUNT],
);

impl<const BIT_COUNT: usize, const BUCKET_COUNT: usize> BitMap<BIT_COUNT, BUCKET_COUNT> {
    // Evaluated once per instantiation; a bad parameter pair fails the build.
    const PARAMS_OK: () = compile_assert_const_params(BIT_COUNT, BUCKET_COUNT);

    pub(crate) const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::PARAMS_OK;
        Self([0u8; BUCKET_COUNT])
    }

    #[inline]
    pub(crate) fn set(&mut self, idx: usize) {
        debug_assert!(idx < BIT_COUNT, "Bit index {idx} out of bounds");
        let (group_idx, item_idx) = Self::idxs(idx);
        self.0[group_idx] |= 1 << item_idx;
    }

    #[inline]
    pub(crate) fn unset(&mut self, idx: usize) {
        debug_assert!(idx < BIT_COUNT, "Bit index {idx} out of bounds");
        let (group_idx, item_idx) = Self::idxs(idx);
        self.0[group_idx] &= !(1 << item_idx);
    }

    #[inline]
    pub(crate) fn is_set(&self, idx: usize) -> bool {
        debug_assert!(idx < BIT_COUNT, "Bit index {idx} out of bounds");
        let (group_idx, item_idx) = Self::idxs(idx);
        self.0[group_idx] & 1 << item_idx != 0
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.0.fill(0);
    }

    #[inline]
    pub(crate) fn popcount(&self) -> usize {
        self.0.iter().map(|b| b.count_ones() as usize).sum()
    }

    #[inline]
    pub(crate) fn none(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    #[inline]
    fn idxs(idx: usize) -> (usize, usize) {
        (idx / 8, idx % 8)
    }

    /// Returns the first set bit at or after `start`, wrapping around past the
    /// last bit, or `None` if no bit is set.
    ///
    /// Visits every bucket once plus the starting bucket a second time for the
    /// bits below `start`, so it always stops after `BUCKET_COUNT + 1` probes.
    pub(crate) fn next_set_bit_wrapping(&self, start: usize) -> Option<usize> {
        let (start_byte, start_bit) = Self::idxs(start % BIT_COUNT);

        for step in 0..=BUCKET_COUNT {
            let byte_idx = (start_byte + step) % BUCKET_COUNT;
            let mask = match step {
                // bits at and above `start`
                0 => !0u8 << start_bit,
                // back at the starting bucket, bits below `start`
                s if s == BUCKET_COUNT => ones_mask(0, start_bit),
                _ => !0u8,
            };
            let byte = self.0[byte_idx] & mask;
            if byte != 0 {
                return Some(byte_idx * 8 + byte.trailing_zeros() as usize);
            }
        }
        None
    }

    #[inline]
    pub(crate) fn iter_ones(&self) -> IterOnes<'_, BIT_COUNT, BUCKET_COUNT> {
        IterOnes {
            bytes: &self.0,
            byte_idx: 0,
            current: self.0[0],
            base_bit_idx: 0,
        }
    }
}

/// Iterator over the pending slots of a scan set.
///
/// Yields slot indices in ascending order, independent of the scan cursor.
///
/// Returned by [`BitScanSet::iter()`](crate::BitScanSet::iter).
#[derive(Clone, Copy)]
pub struct IterOnes<'bitmap, const BIT_COUNT: usize, const BUCKET_COUNT: usize> {
    bytes: &'bitmap [u8; BUCKET_COUNT],
    byte_idx: usize,
    current: u8,
    base_bit_idx: usize,
}

impl<const BIT_COUNT: usize, const BUCKET_COUNT: usize> Iterator
    for IterOnes<'_, BIT_COUNT, BUCKET_COUNT>
{
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte_idx < BUCKET_COUNT {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                let idx = self.base_bit_idx + tz;
                if idx >= BIT_COUNT {
                    return None;
                }
                self.current &= self.current - 1; // unset LSB
                return Some(idx);
            }

            self.byte_idx += 1;
            self.base_bit_idx += 8;
            self.current = *self.bytes.get(self.byte_idx).unwrap_or(&0);
        }
        None
    }
}

impl<const BIT_COUNT: usize, const BUCKET_COUNT: usize> FusedIterator
    for IterOnes<'_, BIT_COUNT, BUCKET_COUNT>
{
}
