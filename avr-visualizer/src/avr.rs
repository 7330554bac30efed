//! ATmega328P register port on top of `avr-device`.
//!
//! Registers are accessed by volatile loads and stores at their data-space
//! addresses, so the Adcl → Adch read order chosen by
//! [`read_result`](crate::sampler::read_result) is exactly what reaches the
//! bus.

use core::ptr;

use avr_device::atmega328p::{Peripherals, ADC};

use crate::sampler::{AdcPort, Register};

/// [`AdcPort`] for the on-chip ADC.
///
/// Owns the `ADC` peripheral token for setup. The ISR uses
/// [`steal()`](Self::steal) for its result reads.
pub struct Atmega328pAdc {
    _adc: ADC,
}

impl Atmega328pAdc {
    pub fn new(adc: ADC) -> Self {
        Atmega328pAdc { _adc: adc }
    }

    /// Obtain a port without the peripheral token.
    ///
    /// # Safety
    ///
    /// Intended for the conversion-complete ISR, which only reads the result
    /// registers. The caller must not reconfigure the converter through it
    /// while the owning port is in use.
    pub unsafe fn steal() -> Self {
        Atmega328pAdc {
            _adc: unsafe { Peripherals::steal() }.ADC,
        }
    }
}

impl AdcPort for Atmega328pAdc {
    #[inline(always)]
    fn read(&mut self, register: Register) -> u8 {
        // SAFETY: `register` is one of the ADC's memory-mapped registers and
        // we hold (or have stolen) the ADC peripheral.
        unsafe { ptr::read_volatile(register.address() as *const u8) }
    }

    #[inline(always)]
    fn write(&mut self, register: Register, value: u8) {
        // SAFETY: As above; the address is an ADC control register.
        unsafe { ptr::write_volatile(register.address() as *mut u8, value) }
    }

    fn enable_interrupts(&mut self) {
        // SAFETY: Called once, after the sampler and the switchboard are
        // fully set up.
        unsafe { avr_device::interrupt::enable() }
    }
}
