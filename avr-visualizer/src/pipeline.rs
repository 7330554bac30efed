//! The downstream stages a frame passes through, in fixed order.

use crate::capture::Frame;
use crate::sample::Sample;

/// Downstream processing of one frame, run by the foreground loop.
///
/// Stages run in declaration order once per promoted frame:
/// preprocess → fft_prepare → fft_execute → fft_extract → postprocess → render.
/// Stages that read samples get the read-only [`Frame`]; later stages work on
/// state the pipeline owns (FFT scratch, bins, colours).
///
/// The whole sequence must finish within one frame period (see
/// [`SampleTiming::frame_period_us`](crate::sampler::SampleTiming::frame_period_us)),
/// otherwise the next frame is dropped.
pub trait Pipeline<T: Sample, const N: usize> {
    /// Optional conditioning of the raw frame (noise gate, range compression).
    fn preprocess(&mut self, _frame: &Frame<'_, T, N>) {}

    /// Load the FFT input from the frame.
    fn fft_prepare(&mut self, frame: &Frame<'_, T, N>);

    /// Run the transform on the pipeline's own buffers.
    fn fft_execute(&mut self);

    /// Extract bin magnitudes from the transform output.
    fn fft_extract(&mut self);

    /// Optional bin weighting (equalisation).
    fn postprocess(&mut self) {}

    /// Map bins to colours and push them to the LED chain.
    fn render(&mut self);
}
