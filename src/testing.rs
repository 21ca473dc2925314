//! Test doubles for the clock, analog channels and the enable switch.

use core::{
    cell::Cell,
    convert::Infallible,
};

use crate::{
    clock::{
        Clock,
        Instant,
    },
    io::{
        Control,
        ControlInputs,
        HapticIo,
        Output,
    },
};

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_us(&self, micros: u64) {
        self.micros.set(self.micros.get() + micros);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.micros.get())
    }
}

/// Fixed potentiometer positions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pots {
    pub amplitude: u16,
    pub frequency: u16,
    pub offset: u16,
}

impl ControlInputs for Pots {
    fn read(&mut self, control: Control) -> u16 {
        match control {
            Control::Amplitude => self.amplitude,
            Control::Frequency => self.frequency,
            Control::Offset => self.offset,
        }
    }
}

/// Scripted readings and a record of the latest writes.
#[derive(Debug, Default)]
pub struct MockIo {
    pub pots: Pots,
    pub drive: Option<u16>,
    pub offset: Option<u16>,
    pub writes: usize,
    pub frequency_reads: usize,
}

impl MockIo {
    pub fn with_pots(amplitude: u16, frequency: u16, offset: u16) -> Self {
        Self {
            pots: Pots {
                amplitude,
                frequency,
                offset,
            },
            ..Self::default()
        }
    }
}

impl HapticIo for MockIo {
    type Error = Infallible;

    fn read(&mut self, control: Control) -> u16 {
        if control == Control::Frequency {
            self.frequency_reads += 1;
        }
        self.pots.read(control)
    }

    fn write(&mut self, output: Output, value: u16) -> Result<(), Self::Error> {
        self.writes += 1;
        match output {
            Output::Drive => self.drive = Some(value),
            Output::Offset => self.offset = Some(value),
        }
        Ok(())
    }
}

/// A PWM channel that remembers its last duty cycle.
#[derive(Debug)]
pub struct MockPwm {
    pub max_duty: u16,
    pub duty: u16,
}

impl MockPwm {
    pub fn new(max_duty: u16) -> Self {
        Self { max_duty, duty: 0 }
    }
}

impl embedded_hal::pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

/// An input pin whose level is shared with the test body.
#[derive(Debug)]
pub struct MockPin<'a> {
    pub high: &'a Cell<bool>,
}

impl embedded_hal::digital::ErrorType for MockPin<'_> {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for MockPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high.get())
    }
}
