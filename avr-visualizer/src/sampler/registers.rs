//! ATmega328P ADC register addresses and bitfield definitions.
//!
//! Addresses are data-space (memory-mapped) addresses from the ATmega328P
//! datasheet, section "Analog-to-Digital Converter". All registers are
//! 8 bits wide. The 10-bit result is split across ADCL/ADCH: reading ADCL
//! locks both halves until ADCH is read.

// Some fields are defined for completeness (ACME, MUX3, internal
// references) but are not used by the driver.
#![allow(dead_code)]

/// An ADC register reachable through an [`AdcPort`](super::AdcPort).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Result, low byte.
    Adcl,
    /// Result, high byte.
    Adch,
    /// Control and status A.
    Adcsra,
    /// Control and status B.
    Adcsrb,
    /// Multiplexer selection.
    Admux,
    /// Digital input disable 0.
    Didr0,
}

impl Register {
    /// Data-space address.
    pub const fn address(self) -> usize {
        match self {
            Register::Adcl => ADCL,
            Register::Adch => ADCH,
            Register::Adcsra => ADCSRA,
            Register::Adcsrb => ADCSRB,
            Register::Admux => ADMUX,
            Register::Didr0 => DIDR0,
        }
    }
}

// ── Addresses ──────────────────────────────────────────────────────────────

pub const ADCL: usize = 0x78;
pub const ADCH: usize = 0x79;
pub const ADCSRA: usize = 0x7A;
pub const ADCSRB: usize = 0x7B;
pub const ADMUX: usize = 0x7C;
pub const DIDR0: usize = 0x7E;

// ── ADCSRA ─────────────────────────────────────────────────────────────────

/// ADC enable.
pub const ADEN: u8 = 1 << 7;
/// Start conversion. In free-run mode, set once to start the chain.
pub const ADSC: u8 = 1 << 6;
/// Auto-trigger enable (source selected by ADTS in ADCSRB).
pub const ADATE: u8 = 1 << 5;
/// Interrupt flag. Cleared by writing a one, so never write it back.
pub const ADIF: u8 = 1 << 4;
/// Conversion-complete interrupt enable.
pub const ADIE: u8 = 1 << 3;
/// Prescaler select, bits 2:0 (divisor = 1 << ADPS).
pub const ADPS_MASK: u8 = 0b0000_0111;

// ── ADCSRB ─────────────────────────────────────────────────────────────────

/// Analog comparator multiplexer enable.
pub const ACME: u8 = 1 << 6;
/// Auto-trigger source, bits 2:0.
pub const ADTS_MASK: u8 = 0b0000_0111;
/// ADTS value for free-running mode.
pub const ADTS_FREE_RUN: u8 = 0b000;

// ── ADMUX ──────────────────────────────────────────────────────────────────

/// Reference selection, bits 7:6.
pub const REFS_MASK: u8 = 0b1100_0000;
/// REFS value: external reference on AREF, internal Vref off.
pub const REFS_AREF: u8 = 0b0000_0000;
/// REFS value: AVcc with capacitor on AREF.
pub const REFS_AVCC: u8 = 0b0100_0000;
/// REFS value: internal 1.1 V with capacitor on AREF.
pub const REFS_INTERNAL_1V1: u8 = 0b1100_0000;
/// Left-adjust result so the top 8 bits land in ADCH.
pub const ADLAR: u8 = 1 << 5;
/// Channel selection, bits 3:0. Channels 0..=7 are the external pins.
pub const MUX_MASK: u8 = 0b0000_1111;
pub const MUX3: u8 = 1 << 3;

// ── DIDR0 ──────────────────────────────────────────────────────────────────

/// ADC0D..ADC5D: digital input buffers of all six analog pins.
pub const DIDR0_ALL_ANALOG: u8 = 0b0011_1111;
