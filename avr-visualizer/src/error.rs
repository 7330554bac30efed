//! Configuration errors.
//!
//! The capture path has no run-time error channel: overrun silently drops a
//! frame. The only fallible operations are the `const fn` constructors used
//! to validate compile-time settings, so a binary can turn a bad value into
//! a build failure:
//!
//! ```ignore
//! const CHANNEL: Channel = match Channel::new(3) {
//!     Ok(c) => c,
//!     Err(_) => panic!("ADC channel must be in 0..=7"),
//! };
//! ```

use core::fmt;

/// Invalid compile-time sampler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Prescaler divisor outside {4, 8, 16, 32, 64, 128}.
    InvalidPrescaler(u8),
    /// Input multiplexer channel outside 0..=7.
    InvalidChannel(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPrescaler(p) => {
                write!(f, "prescaler {p} is not one of 4, 8, 16, 32, 64, 128")
            }
            ConfigError::InvalidChannel(c) => {
                write!(f, "ADC channel {c} is out of range 0..=7")
            }
        }
    }
}
