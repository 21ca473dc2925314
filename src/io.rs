//! Analog control inputs and outputs owned by the generator.
//!
//! The three potentiometers sit behind [`ControlInputs`]; the drive and offset
//! outputs are any [`SetDutyCycle`] (a DAC, or a filtered PWM channel).
//! [`Channels`] bundles them into the single [`HapticIo`] handle the
//! [`Generator`](crate::Generator) takes ownership of.

use embedded_hal::pwm::SetDutyCycle;

use crate::config::GeneratorConfig;

/// One of the three potentiometer inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Control {
    /// Peak of the sawtooth.
    Amplitude,
    /// Sawtooth frequency, inverted (a higher reading is a lower frequency).
    Frequency,
    /// DC offset passed through to the difference amplifier.
    Offset,
}

/// One of the two analog outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Output {
    /// Primary current drive.
    Drive,
    /// Offset fed to the difference amplifier.
    Offset,
}

/// Non-blocking potentiometer readings.
///
/// Implementations must return promptly; when a fresh conversion is not
/// ready, return the previous value.
pub trait ControlInputs {
    fn read(&mut self, control: Control) -> u16;
}

/// Hardware handle exclusively owned by the generator.
///
/// Values are raw counts in `[0, max_count]` for the configured resolution.
pub trait HapticIo {
    type Error;

    fn read(&mut self, control: Control) -> u16;

    fn write(&mut self, output: Output, value: u16) -> Result<(), Self::Error>;
}

/// Potentiometers plus two duty-cycle outputs sharing one resolution.
pub struct Channels<P, D, O> {
    pots: P,
    drive: D,
    offset: O,
    max_count: u16,
}

impl<P, D, O> Channels<P, D, O>
where
    P: ControlInputs,
    D: SetDutyCycle,
    O: SetDutyCycle<Error = D::Error>,
{
    /// Readings and writes are scaled to the resolution of `config`, the same
    /// config the [`Generator`](crate::Generator) is built with.
    pub fn new(pots: P, drive: D, offset: O, config: &GeneratorConfig) -> Self {
        Self {
            pots,
            drive,
            offset,
            max_count: config.max_count(),
        }
    }

    pub fn release(self) -> (P, D, O) {
        (self.pots, self.drive, self.offset)
    }
}

impl<P, D, O> HapticIo for Channels<P, D, O>
where
    P: ControlInputs,
    D: SetDutyCycle,
    O: SetDutyCycle<Error = D::Error>,
{
    type Error = D::Error;

    fn read(&mut self, control: Control) -> u16 {
        self.pots.read(control).min(self.max_count)
    }

    fn write(&mut self, output: Output, value: u16) -> Result<(), Self::Error> {
        let value = value.min(self.max_count);
        match output {
            Output::Drive => self.drive.set_duty_cycle_fraction(value, self.max_count),
            Output::Offset => self.offset.set_duty_cycle_fraction(value, self.max_count),
        }
    }
}
