//! # avr-visualizer
//!
//! A `no_std`, allocation-free capture engine for an audio-reactive LED
//! visualizer running on an 8-bit AVR (ATmega328P class). One analog input
//! is sampled continuously in free-run mode; every completed conversion
//! lands in a ring from the ADC interrupt, and full rings are handed to a
//! slower foreground loop that runs the spectrum pipeline.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Storage | [`ring`] | Fixed-capacity lossy ring with physical indexing |
//! | Format | [`sample`] | Prescaler → resolution → storage type selection |
//! | Handoff | [`capture`] | Ping/pong switchboard and the read-only [`capture::Frame`] |
//! | Hardware | [`sampler`] | ADC register map, free-run init, ISR-side result read |
//! | Timing | [`sampler::timing`] | Sample rate, ISR budget, first-frame deadline |
//! | Consumer | [`pipeline`] / [`foreground`] | Stage trait and the spin/drain/re-arm loop |
//!
//! ## Quick start
//!
//! ```ignore
//! use avr_visualizer::capture::Switchboard;
//! use avr_visualizer::foreground::Foreground;
//! use avr_visualizer::sample::{Div16, Resolution};
//!
//! type Format = Div16;
//! type Sample = <Format as Resolution>::Sample;
//!
//! static CAPTURE: Switchboard<Sample, 128> = Switchboard::new();
//!
//! // ADC conversion-complete ISR:
//! let sample = read_result::<Sample>(&mut port);
//! CAPTURE.on_sample(sample);
//!
//! // main, after Sampler::init():
//! Foreground::new(&CAPTURE).run(&mut my_pipeline);
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `atmega328p` | no | [`AdcPort`](sampler::AdcPort) implementation on top of `avr-device` |
//! | `defmt` | no | Setup and foreground logging through `defmt` |

#![no_std]

#[macro_use]
mod fmt;

pub mod constants;
pub mod error;
pub mod sample;
pub mod ring;
pub mod capture;
pub mod sampler;
pub mod pipeline;
pub mod foreground;

#[cfg(feature = "atmega328p")]
pub mod avr;


pub use error::ConfigError;
