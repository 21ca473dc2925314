//! Frequency knob to decrement step.

use crate::{
    clock::Duration,
    error::ConfigError,
};

const MICROS_PER_SECOND: f32 = 1_000_000.0;

/// Range the frequency potentiometer sweeps, in Hz.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencyRange {
    min_hz: f32,
    max_hz: f32,
}

impl FrequencyRange {
    pub fn new(min_hz: f32, max_hz: f32) -> Result<Self, ConfigError> {
        // Written so that NaN fails too.
        if !(min_hz > 0.0 && min_hz < max_hz && max_hz.is_finite()) {
            return Err(ConfigError::FrequencyRange);
        }
        Ok(Self { min_hz, max_hz })
    }

    pub fn min_hz(&self) -> f32 {
        self.min_hz
    }

    pub fn max_hz(&self) -> f32 {
        self.max_hz
    }

    /// Maps a knob reading to a frequency. The knob is inverted: `0` gives
    /// `max_hz` and `max_count` gives `min_hz`.
    pub fn target_hz(&self, reading: u16, max_count: u16) -> f32 {
        let reading = reading.min(max_count);
        let normalized = 1.0 - f32::from(reading) / f32::from(max_count);
        normalized * (self.max_hz - self.min_hz) + self.min_hz
    }
}

impl Default for FrequencyRange {
    fn default() -> Self {
        Self {
            min_hz: 1.0,
            max_hz: 100.0,
        }
    }
}

/// Counts to subtract every `interval` so that a ramp of height `ceiling`
/// reaches zero once per period of `target_hz`.
///
/// `interval` must be non-zero.
pub fn decrement_step(target_hz: f32, interval: Duration, ceiling: u16) -> f32 {
    let micros_per_cycle = MICROS_PER_SECOND / target_hz;
    let decrements_per_cycle = micros_per_cycle / interval.ticks() as f32;
    f32::from(ceiling) / decrements_per_cycle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3 * b.abs().max(1.0)
    }

    #[test]
    fn knob_extremes_hit_range_ends() {
        let range = FrequencyRange::new(1.0, 100.0).unwrap();
        assert_eq!(range.target_hz(1023, 1023), 1.0);
        assert_eq!(range.target_hz(0, 1023), 100.0);
    }

    #[test]
    fn out_of_range_reading_is_clamped() {
        let range = FrequencyRange::default();
        assert_eq!(range.target_hz(u16::MAX, 1023), range.min_hz());
    }

    #[test]
    fn higher_reading_never_raises_frequency() {
        let range = FrequencyRange::new(2.5, 250.0).unwrap();
        let mut previous = f32::INFINITY;
        for reading in 0..=4095 {
            let hz = range.target_hz(reading, 4095);
            assert!(hz <= previous, "reading {reading}: {hz} > {previous}");
            assert!(hz >= range.min_hz() && hz <= range.max_hz());
            previous = hz;
        }
    }

    #[test]
    fn step_spreads_ceiling_over_one_period() {
        // 100 Hz with 50 us ticks is 200 decrements per cycle.
        let step = decrement_step(100.0, Duration::micros(50), 1000);
        assert!(close(step, 5.0), "{step}");

        // 1 Hz is 20_000 decrements per cycle.
        let step = decrement_step(1.0, Duration::micros(50), 1023);
        assert!(close(step, 1023.0 / 20_000.0), "{step}");
    }

    #[test]
    fn zero_ceiling_gives_zero_step() {
        assert_eq!(decrement_step(50.0, Duration::micros(50), 0), 0.0);
    }

    #[test]
    fn rejects_degenerate_ranges() {
        assert_eq!(FrequencyRange::new(0.0, 10.0), Err(ConfigError::FrequencyRange));
        assert_eq!(FrequencyRange::new(10.0, 10.0), Err(ConfigError::FrequencyRange));
        assert_eq!(FrequencyRange::new(20.0, 10.0), Err(ConfigError::FrequencyRange));
        assert_eq!(FrequencyRange::new(f32::NAN, 10.0), Err(ConfigError::FrequencyRange));
        assert_eq!(
            FrequencyRange::new(1.0, f32::INFINITY),
            Err(ConfigError::FrequencyRange)
        );
    }
}
