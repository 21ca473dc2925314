//! Error types.

use core::fmt;

/// A [`GeneratorConfig`](crate::GeneratorConfig) that cannot drive the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Analog resolution outside `1..=16` bits.
    Resolution(u8),
    /// Frequency range not satisfying `0 < min < max`, or not finite.
    FrequencyRange,
    /// Default decrement interval of zero.
    ZeroDecrementInterval,
    /// At the lowest frequency the per-tick decrement is too small to move an
    /// `f32` ramp, so the decay would never finish.
    DecayTooSlow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution(bits) => write!(f, "analog resolution of {bits} bits is not in 1..=16"),
            Self::FrequencyRange => f.write_str("frequency range must satisfy 0 < min < max"),
            Self::ZeroDecrementInterval => f.write_str("decrement interval must be non-zero"),
            Self::DecayTooSlow => f.write_str("decrement interval times minimum frequency is below f32 precision"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Failure to construct a [`Generator`](crate::Generator).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeneratorError<E> {
    Config(ConfigError),
    /// The initial zeroing write failed.
    Output(E),
}

impl<E> From<ConfigError> for GeneratorError<E> {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl<E: fmt::Debug> fmt::Display for GeneratorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid generator config: {err}"),
            Self::Output(err) => write!(f, "failed to zero outputs: {err:?}"),
        }
    }
}

/// Failure while polling a [`HapticDriver`](crate::HapticDriver).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<O, S> {
    /// Writing an analog output failed.
    Output(O),
    /// Reading the enable switch failed.
    Switch(S),
}

impl<O: fmt::Debug, S: fmt::Debug> fmt::Display for DriverError<O, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(err) => write!(f, "analog output error: {err:?}"),
            Self::Switch(err) => write!(f, "enable switch error: {err:?}"),
        }
    }
}
