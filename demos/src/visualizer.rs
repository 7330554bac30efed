//! Level meter: end-to-end check of the capture engine on real hardware.
//!
//! Samples ADC0 in free-run mode at prescaler 16 (~76.9 kHz, 8-bit), hands
//! 64-sample frames to the foreground, and lights the on-board LED (PB5)
//! while the frame's peak-to-peak level is above a threshold. The FFT and
//! LED-chain stages of the full visualizer slot into the same
//! [`Pipeline`] implementation.
//!
//! Hardware: ATmega328P @ 16 MHz (Arduino Uno), audio on A0 biased to
//! AREF / 2, reference voltage on AREF.
//!
//! ```text
//!   ADC (free-run) ──ISR──► Switchboard ──Frame──► LevelMeter ──► PB5
//! ```

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use panic_halt as _;

use avr_device::atmega328p::{Peripherals, PORTB};

use avr_visualizer::avr::Atmega328pAdc;
use avr_visualizer::capture::{Frame, Switchboard};
use avr_visualizer::constants::F_CPU_HZ;
use avr_visualizer::foreground::Foreground;
use avr_visualizer::pipeline::Pipeline;
use avr_visualizer::sample::{Div16, Resolution};
use avr_visualizer::sampler::{read_result, Channel, SampleTiming, Sampler};

type Format = Div16;
type Sample = <Format as Resolution>::Sample;

const BUF_SIZE: usize = 64;

const CHANNEL: Channel = match Channel::new(0) {
    Ok(c) => c,
    Err(_) => panic!("ADC channel must be in 0..=7"),
};

const TIMING: SampleTiming = SampleTiming::new(F_CPU_HZ, Format::PRESCALER, BUF_SIZE);

/// Upper estimate of one `ADC()` invocation in CPU cycles: vector jump,
/// register save/restore, the ADCH load, the ring write and the promotion
/// check.
const ISR_CYCLES: u32 = 90;

// The ISR may take at most half of each sample period; the rest is left
// for the foreground pipeline.
const _: () = assert!(TIMING.cycles_per_sample() >= 2 * ISR_CYCLES);

/// Peak-to-peak level that turns the LED on (8-bit counts).
const THRESHOLD: u8 = 24;

static CAPTURE: Switchboard<Sample, BUF_SIZE> = Switchboard::new();

// ── ADC conversion-complete ISR ──────────────────────────────────────────

#[avr_device::interrupt(atmega328p)]
fn ADC() {
    // SAFETY: Only ADCH is read; configuration is owned by `main`.
    let mut port = unsafe { Atmega328pAdc::steal() };
    let sample: Sample = read_result(&mut port);
    CAPTURE.on_sample(sample);
}

// ── Stand-in pipeline ────────────────────────────────────────────────────

struct LevelMeter {
    portb: PORTB,
    min: Sample,
    max: Sample,
    level: u8,
}

impl Pipeline<Sample, BUF_SIZE> for LevelMeter {
    fn fft_prepare(&mut self, frame: &Frame<'_, Sample, BUF_SIZE>) {
        self.min = Sample::MAX;
        self.max = Sample::MIN;
        for s in frame.iter_slots() {
            self.min = self.min.min(s);
            self.max = self.max.max(s);
        }
    }

    fn fft_execute(&mut self) {}

    fn fft_extract(&mut self) {
        self.level = self.max - self.min;
    }

    fn render(&mut self) {
        let on = self.level > THRESHOLD;
        self.portb.portb.modify(|_, w| w.pb5().bit(on));
    }
}

#[avr_device::entry]
fn main() -> ! {
    let dp = Peripherals::take().unwrap();

    dp.PORTB.ddrb.write(|w| w.pb5().set_bit());

    // Switchboard is a static, so it exists before the first interrupt.
    let mut sampler: Sampler<_, Format> = Sampler::new(Atmega328pAdc::new(dp.ADC), CHANNEL);
    sampler.init();

    let mut meter = LevelMeter {
        portb: dp.PORTB,
        min: 0,
        max: 0,
        level: 0,
    };

    Foreground::new(&CAPTURE).run(&mut meter)
}
