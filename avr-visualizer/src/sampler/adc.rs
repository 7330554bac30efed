//! Free-run ADC driver.

use core::marker::PhantomData;

use crate::error::ConfigError;
use crate::sample::{Resolution, Sample};

use super::port::AdcPort;
use super::registers::{self as reg, Register};

/// Validated input multiplexer channel (0..=7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    /// Validate a channel index. Usable in `const` items.
    pub const fn new(index: u8) -> Result<Self, ConfigError> {
        if index > 7 {
            return Err(ConfigError::InvalidChannel(index));
        }
        Ok(Channel(index))
    }

    /// The MUX field value.
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Read one conversion result, honouring the hardware read order.
///
/// Two-byte samples read ADCL first (which latches ADCH) and then ADCH.
/// Single-byte samples expect a left-adjusted result and read ADCH only.
///
/// This is the ISR-side read; it touches no other state.
#[inline(always)]
pub fn read_result<S: Sample, P: AdcPort>(port: &mut P) -> S {
    if S::BYTES > 1 {
        let low = port.read(Register::Adcl);
        let high = port.read(Register::Adch);
        S::from_result(low, high)
    } else {
        S::from_result(0, port.read(Register::Adch))
    }
}

/// ADC sampler driver.
///
/// Generic over the register port and the compile-time [`Resolution`],
/// which fixes the prescaler, the result justification and the sample type.
///
/// # Example
///
/// ```ignore
/// let mut sampler: Sampler<_, Div16> = Sampler::new(port, Channel::new(0)?);
/// sampler.init(); // interrupts are live after this returns
/// ```
pub struct Sampler<P, R> {
    port: P,
    channel: Channel,
    _resolution: PhantomData<R>,
}

impl<P, R> Sampler<P, R>
where
    P: AdcPort,
    R: Resolution,
{
    pub fn new(port: P, channel: Channel) -> Self {
        Sampler {
            port,
            channel,
            _resolution: PhantomData,
        }
    }

    /// Read-modify-write: `new = (current & !mask) | value`.
    fn modify(&mut self, register: Register, value: u8, mask: u8) -> u8 {
        let current = self.port.read(register);
        let mut new_val = (current & !mask) | (value & mask);
        if register == Register::Adcsra {
            // Writing back a set ADIF would clear a pending interrupt.
            new_val &= !reg::ADIF;
        }
        self.port.write(register, new_val);
        new_val
    }

    fn set_bits(&mut self, register: Register, bits: u8) -> u8 {
        self.modify(register, bits, bits)
    }

    /// Configure the converter for free-run sampling, without starting it.
    ///
    /// Applies steps 1–8 of the initialisation order. Interrupts stay
    /// masked, so the switchboard may still be set up afterwards.
    pub fn configure(&mut self) {
        self.set_bits(Register::Adcsra, reg::ADEN);

        self.modify(Register::Adcsrb, reg::ADTS_FREE_RUN, reg::ADTS_MASK);
        self.set_bits(Register::Adcsra, reg::ADATE);

        self.set_bits(Register::Adcsra, reg::ADIE);

        self.modify(Register::Adcsra, R::PRESCALER.adps(), reg::ADPS_MASK);

        self.modify(Register::Admux, reg::REFS_AREF, reg::REFS_MASK);

        let adlar = if R::LEFT_ADJUST { reg::ADLAR } else { 0 };
        self.modify(Register::Admux, adlar, reg::ADLAR);

        self.set_bits(Register::Didr0, reg::DIDR0_ALL_ANALOG);

        self.modify(Register::Admux, self.channel.index(), reg::MUX_MASK);

        debug!(
            "adc configured: prescaler {}, {} bits, channel {}",
            R::PRESCALER.divisor(),
            R::BITS,
            self.channel.index()
        );
    }

    /// Enable global interrupts and trigger the first conversion.
    ///
    /// From here on the conversion-complete ISR fires once per sample.
    pub fn start(&mut self) {
        self.port.enable_interrupts();
        self.set_bits(Register::Adcsra, reg::ADSC);
        info!("adc free-run started");
    }

    /// Full initialisation: [`configure()`](Self::configure) then
    /// [`start()`](Self::start).
    pub fn init(&mut self) {
        self.configure();
        self.start();
    }

    /// Read the latest conversion result.
    pub fn read_sample(&mut self) -> R::Sample {
        read_result::<R::Sample, _>(&mut self.port)
    }

    /// The configured input channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Mutable access to the underlying port.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Give the port back.
    pub fn release(self) -> P {
        self.port
    }
}
