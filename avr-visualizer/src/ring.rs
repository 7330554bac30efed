//! Fixed-capacity lossy ring for ISR-produced samples.
//!
//! The producer side only ever writes: a write stores at the producer index,
//! advances it (wrapping to 0 without a division) and raises the occupancy
//! until it saturates at `N`. Once full, each write silently overwrites the
//! oldest slot, so the producer never stalls.
//!
//! The consumer side reads by *physical* slot index. After a wrapped fill the
//! oldest sample sits at [`position()`](Ring::position); use
//! [`iter()`](Ring::iter) for time order.

use core::ops::Index;

use crate::sample::Sample;

/// A fixed-length ring of `N` samples.
///
/// Invariants between operations: `len() <= N`, `position() < N`.
pub struct Ring<T, const N: usize> {
    buffer: [T; N],
    /// Next write slot.
    index: usize,
    /// Occupancy, saturating at `N`.
    size: usize,
}

impl<T: Sample, const N: usize> Ring<T, N> {
    const NONZERO: () = assert!(N > 0, "ring capacity must be at least 1");

    /// Create an empty ring with zeroed storage.
    ///
    /// `N` must be at least 1. A zero-capacity ring is rejected when the
    /// crate using it is built:
    ///
    /// ```compile_fail
    /// use avr_visualizer::ring::Ring;
    ///
    /// let ring: Ring<u8, 0> = Ring::new();
    /// # let _ = ring;
    /// ```
    pub const fn new() -> Self {
        let () = Self::NONZERO;

        Ring {
            buffer: [T::ZERO; N],
            index: 0,
            size: 0,
        }
    }

    /// Store a sample at the write position and advance.
    #[inline(always)]
    pub fn write(&mut self, sample: T) {
        self.buffer[self.index] = sample;
        self.index += 1;
        if self.index >= N {
            self.index = 0;
        }
        if self.size < N {
            self.size += 1;
        }
    }

    /// Whether `N` samples have been written since the last clear.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.size == N
    }

    /// Whether nothing has been written since the last clear.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Reset occupancy. The write position and stored samples are kept.
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Number of samples written since the last clear, capped at `N`.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Total capacity `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Next write slot. After a wrapped fill this is the oldest sample.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Slot `k` in physical order, or `None` if `k >= N`.
    pub fn get(&self, k: usize) -> Option<&T> {
        self.buffer.get(k)
    }

    /// All slots in physical order.
    pub fn as_slots(&self) -> &[T; N] {
        &self.buffer
    }

    /// All slots in time order, starting at the write position.
    ///
    /// On a ring that is not full, the stale slots come first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (newer, older) = self.buffer.split_at(self.index);
        older.iter().chain(newer.iter())
    }
}

impl<T: Sample, const N: usize> Default for Ring<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Index<usize> for Ring<T, N> {
    type Output = T;

    fn index(&self, k: usize) -> &T {
        &self.buffer[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled<const N: usize>(count: usize) -> Ring<u8, N> {
        let mut ring = Ring::new();
        for v in 0..count {
            ring.write(v as u8);
        }
        ring
    }

    #[test]
    fn fresh_ring_is_empty() {
        let r1: Ring<u8, 1> = Ring::new();
        let r4: Ring<u8, 4> = Ring::new();
        let r128: Ring<u16, 128> = Ring::new();
        assert!(r1.is_empty() && !r1.is_full());
        assert!(r4.is_empty() && !r4.is_full());
        assert!(r128.is_empty() && !r128.is_full());
        assert_eq!(r4.len(), 0);
        assert_eq!(r4.position(), 0);
        assert_eq!(r128.capacity(), 128);
    }

    #[test]
    fn size_saturates_at_capacity() {
        for k in 0..20 {
            let ring = filled::<7>(k);
            assert_eq!(ring.len(), k.min(7), "k = {k}");
            assert_eq!(ring.is_full(), k >= 7, "k = {k}");
            assert!(ring.position() < 7);
            assert_eq!(ring.position(), k % 7);
        }
    }

    #[test]
    fn single_slot_ring_is_full_after_one_write() {
        let mut ring: Ring<u8, 1> = Ring::new();
        ring.write(5);
        assert!(ring.is_full());
        assert_eq!(ring.position(), 0);
        ring.write(6);
        assert_eq!(ring[0], 6);
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn overwrite_replaces_oldest_slot() {
        let mut ring: Ring<u8, 5> = Ring::new();
        for v in [10, 11, 12, 13, 14] {
            ring.write(v);
        }
        ring.write(15);
        assert_eq!(ring.as_slots(), &[15, 11, 12, 13, 14]);
        assert_eq!(ring.position(), 1);
        assert!(ring.is_full());
    }

    #[test]
    fn clear_keeps_position_and_contents() {
        let mut ring: Ring<u8, 4> = filled(6);
        assert_eq!(ring.position(), 2);
        ring.clear();
        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.position(), 2);
        assert_eq!(ring.as_slots(), &[4, 5, 2, 3]);

        ring.write(100);
        ring.write(101);
        assert_eq!(ring[2], 100);
        assert_eq!(ring[3], 101);
        assert_eq!(ring[0], 4);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn index_returns_last_write_to_slot() {
        let mut ring: Ring<u16, 3> = Ring::new();
        let values = [300u16, 301, 302, 303, 304, 305, 306, 307];
        for (n, &v) in values.iter().enumerate() {
            ring.write(v);
            let slot = n % 3;
            assert_eq!(ring[slot], v);
            assert_eq!(ring.get(slot), Some(&v));
        }
        assert_eq!(ring.get(3), None);
    }

    #[test]
    fn iter_is_time_ordered_after_wrap() {
        let ring: Ring<u8, 4> = filled(6);
        let mut out = [0u8; 4];
        for (o, &v) in out.iter_mut().zip(ring.iter()) {
            *o = v;
        }
        assert_eq!(out, [2, 3, 4, 5]);
        assert_eq!(ring.iter().count(), 4);
    }

    #[test]
    fn iter_without_wrap_starts_at_slot_zero() {
        let ring: Ring<u8, 4> = filled(4);
        assert_eq!(ring.position(), 0);
        assert!(ring.iter().copied().eq([0u8, 1, 2, 3]));
    }
}
