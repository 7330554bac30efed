//! Sampling-rate and deadline arithmetic.
//!
//! Free-run conversions take 13 ADC clocks; the first after enabling takes
//! 25. With a 16 MHz system clock:
//!
//! | Prescaler | ADC clock | Fs (Hz) | Fn (Hz) | CPU cycles / sample |
//! |-----------|-----------|---------|---------|---------------------|
//! | 4   | 4 MHz    | 307 692 | 153 846 | 52   |
//! | 8   | 2 MHz    | 153 846 | 76 923  | 104  |
//! | 16  | 1 MHz    | 76 923  | 38 461  | 208  |
//! | 32  | 500 kHz  | 38 461  | 19 230  | 416  |
//! | 64  | 250 kHz  | 19 230  | 9 615   | 832  |
//! | 128 | 125 kHz  | 9 615   | 4 807   | 1664 |
//!
//! The ISR must finish within its CPU-cycle budget or samples are lost, and
//! the foreground must drain a frame within one frame period or a frame is
//! dropped.

use crate::constants::{CONVERSION_CLOCKS, FIRST_CONVERSION_CLOCKS};
use crate::sample::Prescaler;

/// Derived timing for one sampler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleTiming {
    f_cpu_hz: u32,
    prescaler: Prescaler,
    frame_len: u32,
}

impl SampleTiming {
    pub const fn new(f_cpu_hz: u32, prescaler: Prescaler, frame_len: usize) -> Self {
        assert!(frame_len > 0, "frame length must be at least 1");
        assert!(frame_len <= u32::MAX as usize, "frame length must fit in u32");
        SampleTiming {
            f_cpu_hz,
            prescaler,
            frame_len: frame_len as u32,
        }
    }

    pub const fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    pub const fn frame_len(&self) -> u32 {
        self.frame_len
    }

    /// ADC clock frequency.
    pub const fn adc_clock_hz(&self) -> u32 {
        self.f_cpu_hz / self.prescaler.divisor() as u32
    }

    /// Effective sample rate Fs.
    pub const fn sample_rate_hz(&self) -> u32 {
        self.adc_clock_hz() / CONVERSION_CLOCKS
    }

    /// Nyquist frequency Fs / 2.
    pub const fn nyquist_hz(&self) -> u32 {
        self.sample_rate_hz() / 2
    }

    /// CPU cycles between two conversion-complete interrupts: the ISR
    /// budget, including entry and exit.
    pub const fn cycles_per_sample(&self) -> u32 {
        self.prescaler.divisor() as u32 * CONVERSION_CLOCKS
    }

    /// One conversion period in nanoseconds.
    pub const fn sample_period_ns(&self) -> u32 {
        (self.cycles_per_sample() as u64 * 1_000_000_000 / self.f_cpu_hz as u64) as u32
    }

    /// Time to fill one ring in steady state. The foreground must drain a
    /// frame within this window to avoid dropping the next one.
    pub const fn frame_period_us(&self) -> u32 {
        self.adc_clocks_to_us(self.frame_len as u64 * CONVERSION_CLOCKS as u64)
    }

    /// Time from the first ADSC until the first frame is promoted, counting
    /// the longer first conversion. A one-time latency.
    pub const fn first_frame_us(&self) -> u32 {
        let clocks = FIRST_CONVERSION_CLOCKS as u64
            + (self.frame_len as u64 - 1) * CONVERSION_CLOCKS as u64;
        self.adc_clocks_to_us(clocks)
    }

    /// Steady-state frames per second (frame rate of the visualizer).
    pub const fn frames_per_second(&self) -> u32 {
        self.sample_rate_hz() / self.frame_len
    }

    /// Width of one FFT bin for a frame of this length.
    pub const fn bin_width_hz(&self) -> u32 {
        self.frames_per_second()
    }

    const fn adc_clocks_to_us(&self, clocks: u64) -> u32 {
        let cycles = clocks * self.prescaler.divisor() as u64;
        (cycles * 1_000_000 / self.f_cpu_hz as u64) as u32
    }
}
