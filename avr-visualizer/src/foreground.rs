//! Foreground coordination: wait for a frame, drain it, re-arm.
//!
//! ```text
//!   ┌──────────────┐  busy   ┌──────────────────────────────┐  drop  ┌────────┐
//!   │ spin on busy │ ──────► │ pipeline stages on the Frame │ ─────► │ re-arm │ ─┐
//!   └──────────────┘         └──────────────────────────────┘        └────────┘  │
//!          ▲                                                                      │
//!          └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The spin is intentional: the core has no other work, and sleeping would
//! add wake-up latency to the interrupt budget. Nothing here masks
//! interrupts.

use core::hint::spin_loop;

use crate::capture::{Frame, Switchboard};
use crate::pipeline::Pipeline;
use crate::sample::Sample;

/// The consumer side of a [`Switchboard`].
///
/// Holds the switchboard for the program's lifetime. `&mut self` on every
/// draining method keeps at most one [`Frame`] alive at a time.
pub struct Foreground<'a, T, const N: usize> {
    board: &'a Switchboard<T, N>,
    frames: u32,
}

impl<'a, T: Sample, const N: usize> Foreground<'a, T, N> {
    pub fn new(board: &'a Switchboard<T, N>) -> Self {
        info!("foreground: frame length {}", N);
        Foreground { board, frames: 0 }
    }

    /// Drain the pending frame, if there is one. Never blocks.
    ///
    /// Returns `true` if a frame was processed.
    pub fn poll<P: Pipeline<T, N>>(&mut self, pipeline: &mut P) -> bool {
        let board = self.board;
        match board.try_frame() {
            Some(frame) => {
                self.drain(frame, pipeline);
                true
            }
            None => false,
        }
    }

    /// Spin until a frame is promoted, then drain it.
    pub fn step<P: Pipeline<T, N>>(&mut self, pipeline: &mut P) {
        loop {
            if self.poll(pipeline) {
                return;
            }
            spin_loop();
        }
    }

    /// Run the foreground forever.
    pub fn run<P: Pipeline<T, N>>(mut self, pipeline: &mut P) -> ! {
        loop {
            self.step(pipeline);
        }
    }

    /// Frames drained so far (wrapping).
    pub fn frames_processed(&self) -> u32 {
        self.frames
    }

    /// The switchboard being drained.
    pub fn board(&self) -> &'a Switchboard<T, N> {
        self.board
    }

    fn drain<P: Pipeline<T, N>>(&mut self, frame: Frame<'_, T, N>, pipeline: &mut P) {
        trace!("frame {} from {}", self.frames, frame.slot());

        pipeline.preprocess(&frame);
        pipeline.fft_prepare(&frame);
        pipeline.fft_execute();
        pipeline.fft_extract();
        pipeline.postprocess();
        pipeline.render();

        // Clears the process ring and drops `busy`.
        frame.release();
        self.frames = self.frames.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the order of stage calls and the chronological frame contents.
    struct Recorder<const N: usize> {
        calls: [u8; 12],
        count: usize,
        input: [u8; N],
    }

    impl<const N: usize> Recorder<N> {
        fn new() -> Self {
            Recorder {
                calls: [0; 12],
                count: 0,
                input: [0; N],
            }
        }

        fn mark(&mut self, stage: u8) {
            self.calls[self.count] = stage;
            self.count += 1;
        }
    }

    impl<const N: usize> Pipeline<u8, N> for Recorder<N> {
        fn preprocess(&mut self, _frame: &Frame<'_, u8, N>) {
            self.mark(1);
        }

        fn fft_prepare(&mut self, frame: &Frame<'_, u8, N>) {
            frame.copy_chronological(&mut self.input);
            self.mark(2);
        }

        fn fft_execute(&mut self) {
            self.mark(3);
        }

        fn fft_extract(&mut self) {
            self.mark(4);
        }

        fn postprocess(&mut self) {
            self.mark(5);
        }

        fn render(&mut self) {
            self.mark(6);
        }
    }

    /// Only the required stages, relying on the default no-ops.
    struct Minimal {
        prepared: u32,
        rendered: u32,
    }

    impl Pipeline<u16, 2> for Minimal {
        fn fft_prepare(&mut self, _frame: &Frame<'_, u16, 2>) {
            self.prepared += 1;
        }
        fn fft_execute(&mut self) {}
        fn fft_extract(&mut self) {}
        fn render(&mut self) {
            self.rendered += 1;
        }
    }

    #[test]
    fn poll_without_frame_does_nothing() {
        let sb: Switchboard<u8, 4> = Switchboard::new();
        let mut fg = Foreground::new(&sb);
        let mut rec = Recorder::<4>::new();
        assert!(!fg.poll(&mut rec));
        assert_eq!(rec.count, 0);
        assert_eq!(fg.frames_processed(), 0);
    }

    #[test]
    fn stages_run_in_order_then_rearm() {
        let sb: Switchboard<u8, 4> = Switchboard::new();
        for v in [10, 20, 30, 40] {
            sb.on_sample(v);
        }
        let mut fg = Foreground::new(&sb);
        let mut rec = Recorder::<4>::new();
        assert!(sb.is_busy());

        assert!(fg.poll(&mut rec));
        assert_eq!(&rec.calls[..rec.count], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(rec.input, [10, 20, 30, 40]);
        assert!(!sb.is_busy());
        assert_eq!(fg.frames_processed(), 1);
        assert!(!fg.poll(&mut rec));
    }

    #[test]
    fn step_returns_once_frame_is_drained() {
        let sb: Switchboard<u16, 2> = Switchboard::new();
        sb.on_sample(1);
        sb.on_sample(2);
        let mut fg = Foreground::new(&sb);
        let mut p = Minimal {
            prepared: 0,
            rendered: 0,
        };
        fg.step(&mut p);
        assert_eq!((p.prepared, p.rendered), (1, 1));
        assert!(!fg.board().is_busy());
    }

    #[test]
    fn each_poll_drains_one_frame() {
        let sb: Switchboard<u8, 2> = Switchboard::new();
        let mut fg = Foreground::new(&sb);
        let mut rec = Recorder::<2>::new();
        for round in 0..2u8 {
            sb.on_sample(round * 2);
            sb.on_sample(round * 2 + 1);
            assert!(fg.poll(&mut rec));
            assert_eq!(rec.input, [round * 2, round * 2 + 1]);
        }
        assert_eq!(fg.frames_processed(), 2);
    }
}
