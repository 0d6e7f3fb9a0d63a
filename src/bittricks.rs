// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
bit packing for slot state.

Each fixed-capacity slot array (attributes, buffer bindings) has its per-slot
booleans packed into one [`SlotMask`].
*/

/// A fixed-width set of slot indices, one bit per slot.
///
/// Value-typed and `Copy`; iterating a mask yields set indices in ascending order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SlotMask(u32);

impl SlotMask {
    /// Number of slots representable by a mask.
    pub const CAPACITY: usize = u32::BITS as usize;

    pub const EMPTY: SlotMask = SlotMask(0);

    pub const fn from_bits(bits: u32) -> Self {
        SlotMask(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    fn bit(index: usize) -> u32 {
        assert!(
            index < Self::CAPACITY,
            "slot index {index} exceeds mask capacity {}",
            Self::CAPACITY
        );
        1u32 << index
    }

    #[inline]
    pub fn test(self, index: usize) -> bool {
        self.0 & Self::bit(index) != 0
    }

    #[inline]
    pub fn set(&mut self, index: usize) {
        self.0 |= Self::bit(index);
    }

    #[inline]
    pub fn clear(&mut self, index: usize) {
        self.0 &= !Self::bit(index);
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the set slot indices, lowest first.
    pub fn iter(self) -> SetBits {
        SetBits(self.0)
    }
}

impl IntoIterator for SlotMask {
    type Item = usize;
    type IntoIter = SetBits;
    fn into_iter(self) -> SetBits {
        self.iter()
    }
}

impl FromIterator<usize> for SlotMask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut mask = SlotMask::EMPTY;
        for index in iter {
            mask.set(index);
        }
        mask
    }
}

/// Iterator over the set bits of a [`SlotMask`].
#[derive(Debug, Clone)]
pub struct SetBits(u32);

impl Iterator for SetBits {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        //clear lowest set bit
        self.0 &= self.0 - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SetBits {}

#[cfg(test)]
mod tests {
    use super::SlotMask;

    #[test]
    fn set_test_clear() {
        let mut mask = SlotMask::EMPTY;
        assert!(mask.is_empty());
        mask.set(3);
        mask.set(0);
        assert!(mask.test(3));
        assert!(mask.test(0));
        assert!(!mask.test(1));
        assert_eq!(mask.bits(), 0b1001);
        mask.clear(3);
        assert!(!mask.test(3));
        assert_eq!(mask.count(), 1);
        //clearing an unset bit is harmless
        mask.clear(7);
        assert_eq!(mask.bits(), 0b1);
    }

    #[test]
    fn iterates_ascending() {
        let mask = SlotMask::from_bits(0b1010_0110 | 1 << 31);
        let indices: Vec<usize> = mask.iter().collect();
        assert_eq!(indices, vec![1, 2, 5, 7, 31]);
        assert_eq!(mask.iter().len(), 5);
    }

    #[test]
    fn collect_from_indices() {
        let mask: SlotMask = [4usize, 1, 4].into_iter().collect();
        assert_eq!(mask, SlotMask::from_bits(0b10010));
    }

    #[test]
    #[should_panic]
    fn out_of_capacity_panics() {
        let mut mask = SlotMask::EMPTY;
        mask.set(SlotMask::CAPACITY);
    }
}
