//! ADC sampler: register map, free-run initialisation and result reads.
//!
//! The frame rate, resolution and ISR deadline all derive from how the
//! converter is configured, so initialisation is part of the capture core.
//! The driver is generic over an [`AdcPort`], the seam to the memory-mapped
//! registers; the `atmega328p` feature provides the real one.
//!
//! ## Initialisation order
//!
//! | Step | Register | Setting |
//! |------|----------|---------|
//! | 1 | ADCSRA | ADEN: converter on |
//! | 2 | ADCSRB / ADCSRA | ADTS = free-run, ADATE: auto-trigger |
//! | 3 | ADCSRA | ADIE: conversion-complete interrupt |
//! | 4 | ADCSRA | ADPS: prescaler |
//! | 5 | ADMUX | REFS = external AREF |
//! | 6 | ADMUX | ADLAR: left-adjust when W ≤ 8 |
//! | 7 | DIDR0 | Digital input buffers off on ADC0..ADC5 |
//! | 8 | ADMUX | MUX: input channel |
//! | 9 | SREG | Global interrupts on |
//! | 10 | ADCSRA | ADSC: first conversion, starts the free-run chain |
//!
//! The first conversion takes 25 ADC clocks instead of 13; see
//! [`timing::SampleTiming::first_frame_us`].

pub mod registers;
pub mod timing;

mod adc;
mod port;

pub use adc::{read_result, Channel, Sampler};
pub use port::AdcPort;
pub use registers::Register;
pub use timing::SampleTiming;

#[cfg(test)]
pub(crate) mod mock;
