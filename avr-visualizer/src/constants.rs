/// CPU clock of the reference board (Arduino Uno class), in Hz.
pub const F_CPU_HZ: u32 = 16_000_000;

/// Default frame length (ring capacity) in samples.
pub const DEFAULT_BUF_SIZE: usize = 128;

/// ADC clocks per conversion in free-run mode.
pub const CONVERSION_CLOCKS: u32 = 13;

/// ADC clocks taken by the first conversion after the converter is enabled
/// (analog front-end initialisation).
pub const FIRST_CONVERSION_CLOCKS: u32 = 25;
