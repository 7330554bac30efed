//! Recording register port for host tests.

use super::port::AdcPort;
use super::registers::Register;

/// One recorded port operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(Register),
    Write(Register, u8),
    Sei,
}

const LOG_LEN: usize = 64;

/// Mock port that maintains a register file and records every access.
pub struct MockPort {
    regs: [u8; 6],
    log: [Access; LOG_LEN],
    log_count: usize,
    interrupts: bool,
}

fn slot(register: Register) -> usize {
    match register {
        Register::Adcl => 0,
        Register::Adch => 1,
        Register::Adcsra => 2,
        Register::Adcsrb => 3,
        Register::Admux => 4,
        Register::Didr0 => 5,
    }
}

impl MockPort {
    pub fn new() -> Self {
        MockPort {
            regs: [0; 6],
            log: [Access::Sei; LOG_LEN],
            log_count: 0,
            interrupts: false,
        }
    }

    /// Current register value, without recording an access.
    pub fn reg(&self, register: Register) -> u8 {
        self.regs[slot(register)]
    }

    /// Preset a register value, without recording an access.
    pub fn set_reg(&mut self, register: Register, value: u8) {
        self.regs[slot(register)] = value;
    }

    /// Preset the conversion result halves.
    pub fn set_result(&mut self, low: u8, high: u8) {
        self.set_reg(Register::Adcl, low);
        self.set_reg(Register::Adch, high);
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts
    }

    /// Accesses in chronological order.
    pub fn log(&self) -> &[Access] {
        &self.log[..self.log_count]
    }

    /// Register writes in chronological order.
    pub fn writes(&self) -> impl Iterator<Item = (Register, u8)> + '_ {
        self.log().iter().filter_map(|a| match *a {
            Access::Write(r, v) => Some((r, v)),
            _ => None,
        })
    }

    pub fn clear_log(&mut self) {
        self.log_count = 0;
    }

    fn record(&mut self, access: Access) {
        self.log[self.log_count] = access;
        self.log_count += 1;
    }
}

impl AdcPort for MockPort {
    fn read(&mut self, register: Register) -> u8 {
        self.record(Access::Read(register));
        self.reg(register)
    }

    fn write(&mut self, register: Register, value: u8) {
        self.record(Access::Write(register, value));
        self.set_reg(register, value);
    }

    fn enable_interrupts(&mut self) {
        self.record(Access::Sei);
        self.interrupts = true;
    }
}
