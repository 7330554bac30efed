//! Read-only view of a promoted frame.

use core::ops::Index;

use crate::ring::Ring;
use crate::sample::Sample;

use super::switchboard::{Slot, Switchboard};

/// A full ring handed to the foreground.
///
/// The contents are stable for the lifetime of the guard: the ISR writes
/// only into the other ring while the handoff flag is raised. Indexing is in
/// slot order; [`oldest()`](Self::oldest) gives the chronological offset and
/// [`iter()`](Self::iter) walks samples in time order.
///
/// Dropping the guard (or calling [`release()`](Self::release)) is the single
/// per-frame callback into the core: the ring is cleared and the flag drops,
/// so the next full capture ring can be promoted. Holding it forever stalls
/// all further frames.
///
/// Access is read-only. Pipelines that window or transform in place copy
/// into their own scratch first ([`copy_chronological()`](Self::copy_chronological)).
pub struct Frame<'a, T: Sample, const N: usize> {
    board: &'a Switchboard<T, N>,
    slot: Slot,
}

impl<'a, T: Sample, const N: usize> Frame<'a, T, N> {
    pub(crate) fn new(board: &'a Switchboard<T, N>, slot: Slot) -> Self {
        Frame { board, slot }
    }

    #[inline(always)]
    fn ring(&self) -> &Ring<T, N> {
        // SAFETY: While this guard exists `busy` is set and `slot` is the
        // process ring, which the producer never writes.
        unsafe { self.board.ring(self.slot) }
    }

    /// Frame length, equal to the ring capacity.
    pub const fn len(&self) -> usize {
        N
    }

    /// Always `false`: a frame is only promoted when full.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Which ring instance backs this frame.
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Slot index of the oldest sample (the write position at promotion).
    pub fn oldest(&self) -> usize {
        self.ring().position()
    }

    /// Sample at physical slot `k`, or `None` if `k >= N`.
    pub fn get(&self, k: usize) -> Option<&T> {
        self.ring().get(k)
    }

    /// All samples in slot order.
    pub fn as_slots(&self) -> &[T; N] {
        self.ring().as_slots()
    }

    /// Samples in slot order.
    pub fn iter_slots(&self) -> impl Iterator<Item = T> + '_ {
        self.ring().as_slots().iter().copied()
    }

    /// Samples in time order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.ring().iter().copied()
    }

    /// Copy the frame into `dst` in time order.
    pub fn copy_chronological(&self, dst: &mut [T; N]) {
        for (d, s) in dst.iter_mut().zip(self.iter()) {
            *d = s;
        }
    }

    /// Finish with the frame and re-arm the switchboard.
    pub fn release(self) {}
}

impl<T: Sample, const N: usize> Index<usize> for Frame<'_, T, N> {
    type Output = T;

    fn index(&self, k: usize) -> &T {
        &self.ring()[k]
    }
}

impl<T: Sample, const N: usize> Drop for Frame<'_, T, N> {
    fn drop(&mut self) {
        // SAFETY: We are the foreground and own `slot` as the process ring;
        // `&mut self` guarantees no borrow from this guard is still alive.
        unsafe { self.board.release(self.slot) };
    }
}
