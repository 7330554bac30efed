//! The capture switchboard.
//!
//! # Safety Contract
//!
//! - Only ONE context (the ADC conversion-complete ISR) may call
//!   [`on_sample()`](Switchboard::on_sample).
//! - Only ONE context (the foreground) may call
//!   [`try_frame()`](Switchboard::try_frame) and
//!   [`wait_frame()`](Switchboard::wait_frame). At most one [`Frame`] is
//!   live at a time; further calls return `None` until it is dropped.
//! - The ISR must not be re-entered (no nested interrupts).
//!
//! Under this contract the capture ring is touched only by the ISR, and the
//! process ring only by the foreground while `busy` is set. The role byte is
//! written only by the ISR and is a single byte, so the foreground always
//! reads a consistent value.

use core::cell::UnsafeCell;
use core::hint::spin_loop;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::ring::Ring;
use crate::sample::Sample;

use super::frame::Frame;

/// Identity of one of the two ring instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    Ping = 0,
    Pong = 1,
}

impl Slot {
    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    const fn from_raw(raw: u8) -> Self {
        if raw == 0 {
            Slot::Ping
        } else {
            Slot::Pong
        }
    }

    /// The other slot.
    pub const fn other(self) -> Self {
        match self {
            Slot::Ping => Slot::Pong,
            Slot::Pong => Slot::Ping,
        }
    }
}

/// Current role assignment of the two rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Roles {
    /// Ring the ISR writes into.
    pub capture: Slot,
    /// Ring the foreground drains.
    pub process: Slot,
}

/// Two rings plus the state that rotates them.
///
/// Designed to live in a `static`:
///
/// ```ignore
/// static CAPTURE: Switchboard<u8, 128> = Switchboard::new();
/// ```
pub struct Switchboard<T, const N: usize> {
    rings: [UnsafeCell<Ring<T, N>>; 2],
    /// Raw [`Slot`] of the capture ring (only modified by the ISR).
    capture: AtomicU8,
    /// Handoff flag: a frame is pending for the foreground.
    busy: AtomicBool,
    /// A [`Frame`] guard is outstanding (only touched by the foreground).
    taken: AtomicBool,
}

// SAFETY: T: Send is required because samples cross from ISR to main
// context. The contract above gives each ring exactly one accessing context
// at any time, and `busy` (Release/Acquire) orders the ring contents with the
// ownership change.
unsafe impl<T: Send, const N: usize> Sync for Switchboard<T, N> {}

impl<T: Sample, const N: usize> Switchboard<T, N> {
    /// Create the switchboard in the *Capturing* state
    /// (capture = ping, process = pong, busy = false).
    pub const fn new() -> Self {
        Switchboard {
            rings: [UnsafeCell::new(Ring::new()), UnsafeCell::new(Ring::new())],
            capture: AtomicU8::new(Slot::Ping as u8),
            busy: AtomicBool::new(false),
            taken: AtomicBool::new(false),
        }
    }

    /// Producer entry point, called once per conversion from the ISR.
    ///
    /// Writes the sample into the capture ring, then promotes it if it is
    /// full and no frame is pending. Never blocks and never allocates.
    ///
    /// Returns `true` if this sample completed a frame and rotated the rings.
    #[inline(always)]
    pub fn on_sample(&self, sample: T) -> bool {
        let capture = self.capture.load(Ordering::Relaxed);

        // SAFETY: We are the sole producer. The capture ring is never handed
        // out through a Frame, so no other reference to it exists.
        let ring = unsafe { &mut *self.rings[capture as usize].get() };
        ring.write(sample);

        if !self.busy.load(Ordering::Acquire) && ring.is_full() {
            // Swap roles before raising the flag so that a consumer observing
            // busy == true also observes the new roles.
            self.capture.store(capture ^ 1, Ordering::Relaxed);
            self.busy.store(true, Ordering::Release);
            return true;
        }
        false
    }

    /// Whether a frame is pending for (or being drained by) the foreground.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Current role assignment. The two slots always differ.
    pub fn roles(&self) -> Roles {
        let capture = Slot::from_raw(self.capture.load(Ordering::Acquire));
        Roles {
            capture,
            process: capture.other(),
        }
    }

    /// Take the pending frame, if any (consumer side).
    ///
    /// Returns `None` while *Capturing*, and while an earlier guard is still
    /// alive. The frame stays stable until the returned guard is dropped.
    pub fn try_frame(&self) -> Option<Frame<'_, T, N>> {
        if !self.busy.load(Ordering::Acquire) || self.taken.load(Ordering::Relaxed) {
            return None;
        }
        // The ISR never reads `taken`, so a plain store is enough.
        self.taken.store(true, Ordering::Relaxed);
        Some(Frame::new(self, self.roles().process))
    }

    /// Spin until a frame is pending, then take it.
    ///
    /// There is no timeout: if the ISR never fires, or another guard is
    /// never dropped, this never returns.
    pub fn wait_frame(&self) -> Frame<'_, T, N> {
        loop {
            if let Some(frame) = self.try_frame() {
                return frame;
            }
            spin_loop();
        }
    }

    /// Occupancy of the capture ring, read from main context.
    ///
    /// `usize` is wider than the native atomic unit of an 8-bit core, so the
    /// read is done with interrupts masked.
    pub fn capture_fill(&self) -> usize {
        critical_section::with(|_| {
            let capture = self.capture.load(Ordering::Relaxed);
            // SAFETY: Interrupts are masked, so the ISR cannot be mutating
            // the capture ring while we read it.
            unsafe { (*self.rings[capture as usize].get()).len() }
        })
    }

    /// Shared view of a ring. Callers uphold the safety contract.
    ///
    /// # Safety
    ///
    /// The producer must not be writing `slot` for the lifetime of the
    /// returned reference.
    pub(crate) unsafe fn ring(&self, slot: Slot) -> &Ring<T, N> {
        unsafe { &*self.rings[slot.index()].get() }
    }

    /// Hand the process ring back: clear it, then drop the flag.
    ///
    /// # Safety
    ///
    /// Must only be called by the foreground while it owns `slot` as the
    /// process ring, with no outstanding references into it.
    pub(crate) unsafe fn release(&self, slot: Slot) {
        unsafe { (*self.rings[slot.index()].get()).clear() };
        self.taken.store(false, Ordering::Relaxed);
        self.busy.store(false, Ordering::Release);
    }
}

impl<T: Sample, const N: usize> Default for Switchboard<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_capturing() {
        let sb: Switchboard<u8, 4> = Switchboard::new();
        assert!(!sb.is_busy());
        assert_eq!(
            sb.roles(),
            Roles {
                capture: Slot::Ping,
                process: Slot::Pong
            }
        );
        assert!(sb.try_frame().is_none());
        assert_eq!(sb.capture_fill(), 0);
    }

    #[test]
    fn promotes_exactly_on_fill() {
        let sb: Switchboard<u8, 4> = Switchboard::new();
        assert!(!sb.on_sample(1));
        assert!(!sb.on_sample(2));
        assert!(!sb.on_sample(3));
        assert_eq!(sb.capture_fill(), 3);
        assert!(sb.on_sample(4));
        assert!(sb.is_busy());
        assert_eq!(sb.roles().capture, Slot::Pong);
        assert_eq!(sb.roles().process, Slot::Ping);
        assert_eq!(sb.capture_fill(), 0);
    }

    #[test]
    fn roles_never_alias() {
        let sb: Switchboard<u8, 3> = Switchboard::new();
        for v in 0..50u8 {
            let was_busy = sb.is_busy();
            let before = sb.roles();
            let promoted = sb.on_sample(v);
            let after = sb.roles();
            assert_ne!(after.capture, after.process);
            if promoted {
                assert!(!was_busy);
                assert!(sb.is_busy());
                assert_eq!(after.capture, before.process);
            } else {
                assert_eq!(after, before);
            }
            // Drain now and then.
            if v % 7 == 0 {
                if let Some(frame) = sb.try_frame() {
                    frame.release();
                }
            }
        }
    }

    #[test]
    fn no_rotation_while_busy() {
        let sb: Switchboard<u8, 4> = Switchboard::new();
        for v in 1..=4 {
            sb.on_sample(v);
        }
        let roles = sb.roles();
        for v in 5..=20 {
            assert!(!sb.on_sample(v));
            assert!(sb.is_busy());
            assert_eq!(sb.roles(), roles);
        }
        assert_eq!(sb.capture_fill(), 4);
    }

    #[test]
    fn release_rearms_and_clears_process_ring() {
        let sb: Switchboard<u8, 2> = Switchboard::new();
        sb.on_sample(1);
        sb.on_sample(2);
        let frame = sb.try_frame().unwrap();
        let slot = frame.slot();
        frame.release();
        assert!(!sb.is_busy());
        assert!(sb.try_frame().is_none());
        // SAFETY: Single-threaded test; the slot is no longer being produced.
        let ring = unsafe { sb.ring(slot) };
        assert!(ring.is_empty());
        assert_eq!(ring.position(), 0);
    }

    #[test]
    fn full_capture_ring_promotes_on_next_sample_after_release() {
        let sb: Switchboard<u8, 2> = Switchboard::new();
        sb.on_sample(1);
        sb.on_sample(2); // ping promoted
        sb.on_sample(3);
        sb.on_sample(4); // pong full, not promoted
        sb.on_sample(5); // pong overwritten
        assert_eq!(sb.roles().capture, Slot::Pong);

        sb.try_frame().unwrap().release();
        assert!(sb.on_sample(6));
        let frame = sb.try_frame().unwrap();
        assert_eq!(frame.slot(), Slot::Pong);
        assert!(frame.iter().eq([5u8, 6]));
    }

    #[test]
    fn second_frame_refused_while_first_is_held() {
        let sb: Switchboard<u8, 2> = Switchboard::new();
        sb.on_sample(1);
        sb.on_sample(2);
        let held = sb.try_frame().unwrap();
        assert!(sb.try_frame().is_none());
        assert!(sb.try_frame().is_none());

        // The ISR keeps filling the other ring; the held frame must not move.
        for v in 3..=9 {
            assert!(!sb.on_sample(v));
            assert!(sb.is_busy());
            assert_eq!(*held.as_slots(), [1, 2]);
        }
        assert_eq!(held.slot(), Slot::Ping);
        held.release();

        assert!(sb.on_sample(10));
        let next = sb.try_frame().unwrap();
        assert_eq!(next.slot(), Slot::Pong);
        assert!(next.iter().eq([9u8, 10]));
        assert!(sb.try_frame().is_none());
        drop(next);
        assert!(!sb.is_busy());
        assert!(sb.try_frame().is_none());
    }

    #[test]
    fn wait_frame_returns_pending_frame() {
        let sb: Switchboard<u16, 2> = Switchboard::new();
        sb.on_sample(0x1FF);
        sb.on_sample(0x100);
        let frame = sb.wait_frame();
        assert_eq!(frame[0], 0x1FF);
        assert_eq!(frame[1], 0x100);
    }

    #[test]
    fn works_from_a_static() {
        static BOARD: Switchboard<u8, 3> = Switchboard::new();
        for v in 0..3 {
            BOARD.on_sample(v);
        }
        let frame = BOARD.try_frame().expect("frame pending");
        assert_eq!(frame.len(), 3);
        drop(frame);
        assert!(!BOARD.is_busy());
    }
}
