//! Generator configuration.

use crate::{
    clock::Duration,
    error::ConfigError,
    frequency::FrequencyRange,
};

/// Default analog resolution in bits.
pub const DEFAULT_RESOLUTION: u8 = 10;

/// Default spacing between ramp decrements.
pub const DEFAULT_DECREMENT_INTERVAL: Duration = Duration::micros(50);

/// Construction-time settings for a [`Generator`](crate::Generator).
///
/// ```rust
/// use haptic_sawtooth::{FrequencyRange, GeneratorConfig};
///
/// let config = GeneratorConfig::default()
///     .with_resolution(12)
///     .with_frequency_range(FrequencyRange::new(1.0, 50.0).unwrap());
/// assert_eq!(config.max_count(), 4095);
/// assert_eq!(config.zero_value(), 2047);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GeneratorConfig {
    resolution: u8,
    frequency_range: FrequencyRange,
    decrement_interval: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            frequency_range: FrequencyRange::default(),
            decrement_interval: DEFAULT_DECREMENT_INTERVAL,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_resolution(mut self, bits: u8) -> Self {
        self.resolution = bits;
        self
    }

    #[must_use]
    pub fn with_frequency_range(mut self, range: FrequencyRange) -> Self {
        self.frequency_range = range;
        self
    }

    /// Decrement spacing used while the caller does not pass an override to
    /// [`Generator::step`](crate::Generator::step).
    #[must_use]
    pub fn with_decrement_interval(mut self, interval: Duration) -> Self {
        self.decrement_interval = interval;
        self
    }

    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    pub fn frequency_range(&self) -> FrequencyRange {
        self.frequency_range
    }

    pub fn decrement_interval(&self) -> Duration {
        self.decrement_interval
    }

    /// Largest analog count, `2^resolution - 1`.
    ///
    /// Only meaningful for a config that passes [`validate`](Self::validate).
    pub fn max_count(&self) -> u16 {
        ((1u32 << self.resolution.clamp(1, 16)) - 1) as u16
    }

    /// Output count for zero net current through the actuator.
    pub fn zero_value(&self) -> u16 {
        self.max_count() / 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=16).contains(&self.resolution) {
            return Err(ConfigError::Resolution(self.resolution));
        }
        if self.decrement_interval.ticks() == 0 {
            return Err(ConfigError::ZeroDecrementInterval);
        }
        // A decrement is `ceiling * interval * hz / 1e6`, and the ramp never
        // exceeds the ceiling, so this fraction must resolve against one ULP.
        let fraction = self.decrement_interval.ticks() as f32 * self.frequency_range.min_hz() / 1_000_000.0;
        if fraction < f32::EPSILON {
            return Err(ConfigError::DecayTooSlow);
        }
        Ok(())
    }
}
