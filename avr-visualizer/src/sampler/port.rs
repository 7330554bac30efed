use super::registers::Register;

/// Access to the ADC's memory-mapped registers and the global interrupt
/// enable.
///
/// Register accesses are volatile on real hardware and cannot fail.
pub trait AdcPort {
    /// Read an 8-bit register.
    fn read(&mut self, register: Register) -> u8;

    /// Write an 8-bit register.
    fn write(&mut self, register: Register, value: u8);

    /// Enable global interrupts (AVR `sei`).
    fn enable_interrupts(&mut self);
}

impl<P: AdcPort + ?Sized> AdcPort for &mut P {
    fn read(&mut self, register: Register) -> u8 {
        (**self).read(register)
    }

    fn write(&mut self, register: Register, value: u8) {
        (**self).write(register, value)
    }

    fn enable_interrupts(&mut self) {
        (**self).enable_interrupts()
    }
}
