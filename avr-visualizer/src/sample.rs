//! Sample formats and prescaler-derived resolution.
//!
//! The ADC prescaler fixes the sample clock, and with it the number of
//! bits that are still meaningful in each conversion:
//!
//! | Prescaler | ADC clock @16 MHz | Effective bits | Storage |
//! |-----------|-------------------|----------------|---------|
//! | 4   | 4 MHz    | 5 | `u8`  |
//! | 8   | 2 MHz    | 7 | `u8`  |
//! | 16  | 1 MHz    | 8 | `u8`  |
//! | 32  | 500 kHz  | 9 | `u16` |
//! | 64  | 250 kHz  | 9 | `u16` |
//! | 128 | 125 kHz  | 9 | `u16` |
//!
//! The choice is made at compile time through a marker type implementing
//! [`Resolution`]. There is no marker for any other divisor, so an invalid
//! prescaler does not build. [`Truncate8`] drops the LSB of a 9-bit
//! resolution to keep storage single-byte.

use core::marker::PhantomData;

use crate::error::ConfigError;

/// A unit of ring storage.
///
/// Copy is trivial and side-effect free; the ISR never runs a constructor
/// or destructor for a sample.
pub trait Sample: Copy + Send + 'static {
    /// Value used to fill fresh ring storage.
    const ZERO: Self;

    /// Storage size in bytes.
    const BYTES: usize;

    /// Build a sample from the ADC result register halves.
    ///
    /// Single-byte samples take the left-adjusted high byte and ignore `low`.
    fn from_result(low: u8, high: u8) -> Self;

    /// Widen to `u16` for downstream arithmetic.
    fn to_u16(self) -> u16;
}

impl Sample for u8 {
    const ZERO: Self = 0;
    const BYTES: usize = 1;

    #[inline(always)]
    fn from_result(_low: u8, high: u8) -> Self {
        high
    }

    #[inline(always)]
    fn to_u16(self) -> u16 {
        self as u16
    }
}

impl Sample for u16 {
    const ZERO: Self = 0;
    const BYTES: usize = 2;

    #[inline(always)]
    fn from_result(low: u8, high: u8) -> Self {
        u16::from_le_bytes([low, high])
    }

    #[inline(always)]
    fn to_u16(self) -> u16 {
        self
    }
}

/// ADC clock prescaler (system clock divisor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
}

impl Prescaler {
    /// Validate a numeric divisor. Usable in `const` items.
    pub const fn from_divisor(divisor: u8) -> Result<Self, ConfigError> {
        match divisor {
            4 => Ok(Prescaler::Div4),
            8 => Ok(Prescaler::Div8),
            16 => Ok(Prescaler::Div16),
            32 => Ok(Prescaler::Div32),
            64 => Ok(Prescaler::Div64),
            128 => Ok(Prescaler::Div128),
            other => Err(ConfigError::InvalidPrescaler(other)),
        }
    }

    /// The divisor between system clock and ADC clock.
    pub const fn divisor(self) -> u8 {
        1 << self.adps()
    }

    /// ADPS[2:0] field value; the divisor is `1 << adps`.
    pub const fn adps(self) -> u8 {
        match self {
            Prescaler::Div4 => 2,
            Prescaler::Div8 => 3,
            Prescaler::Div16 => 4,
            Prescaler::Div32 => 5,
            Prescaler::Div64 => 6,
            Prescaler::Div128 => 7,
        }
    }

    /// Effective resolution the converter delivers at this clock.
    pub const fn native_bits(self) -> u8 {
        match self {
            Prescaler::Div4 => 5,
            Prescaler::Div8 => 7,
            Prescaler::Div16 => 8,
            Prescaler::Div32 | Prescaler::Div64 | Prescaler::Div128 => 9,
        }
    }
}

impl TryFrom<u8> for Prescaler {
    type Error = ConfigError;

    fn try_from(divisor: u8) -> Result<Self, Self::Error> {
        Prescaler::from_divisor(divisor)
    }
}

/// Compile-time sampling resolution: prescaler, width and storage type.
pub trait Resolution {
    /// Storage unit: `u8` when `BITS <= 8`, `u16` otherwise.
    type Sample: Sample;

    /// ADC clock prescaler.
    const PRESCALER: Prescaler;

    /// Effective sample width W in bits.
    const BITS: u8;

    /// Whether the result register is left-adjusted (ADLAR) so a single
    /// read of ADCH yields the sample.
    const LEFT_ADJUST: bool = Self::BITS <= 8;
}

macro_rules! resolution {
    ($(#[$meta:meta])* $name:ident, $prescaler:ident, $sample:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Resolution for $name {
            type Sample = $sample;
            const PRESCALER: Prescaler = Prescaler::$prescaler;
            const BITS: u8 = Prescaler::$prescaler.native_bits();
        }
    };
}

resolution!(
    /// Prescaler 4: 5-bit samples in `u8`.
    Div4, Div4, u8
);
resolution!(
    /// Prescaler 8: 7-bit samples in `u8`.
    Div8, Div8, u8
);
resolution!(
    /// Prescaler 16: 8-bit samples in `u8`.
    Div16, Div16, u8
);
resolution!(
    /// Prescaler 32: 9-bit samples in `u16`.
    Div32, Div32, u16
);
resolution!(
    /// Prescaler 64: 9-bit samples in `u16`.
    Div64, Div64, u16
);
resolution!(
    /// Prescaler 128: 9-bit samples in `u16`.
    Div128, Div128, u16
);

/// Force 8-bit storage for a 9-bit resolution by dropping the LSB.
///
/// The result register is left-adjusted and only ADCH is read. Only
/// resolutions with `u16` storage can be truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncate8<R>(PhantomData<R>);

impl<R> Resolution for Truncate8<R>
where
    R: Resolution<Sample = u16>,
{
    type Sample = u8;
    const PRESCALER: Prescaler = R::PRESCALER;
    const BITS: u8 = 8;
}
