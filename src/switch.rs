//! Debounced run/stop rocker switch.
//!
//! The switch pulls its input low when on. Debouncing is a lockout: a level
//! change is accepted only if at least `debounce` has passed since the last
//! accepted one, and is reported on the poll that sees it.

use embedded_hal::digital::InputPin;

use crate::clock::{
    Clock,
    Duration,
    Stopwatch,
};

/// Lockout after an accepted change.
pub const DEFAULT_DEBOUNCE: Duration = Duration::millis(5);

/// A debounced level change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// High to low: switched on.
    Falling,
    /// Low to high: switched off.
    Rising,
}

/// Polled, active-low enable switch.
pub struct RockerSwitch<P, C> {
    pin: P,
    clock: C,
    debounce: Duration,
    low: bool,
    last_change: Stopwatch,
}

impl<P, C> RockerSwitch<P, C>
where
    P: InputPin,
    C: Clock,
{
    /// Samples the pin once for the initial state.
    pub fn new(mut pin: P, clock: C, debounce: Duration) -> Result<Self, P::Error> {
        let low = pin.is_low()?;
        let last_change = Stopwatch::started_at(clock.now());
        Ok(Self {
            pin,
            clock,
            debounce,
            low,
            last_change,
        })
    }

    /// Samples the pin and reports an accepted change, if any.
    pub fn poll(&mut self) -> Result<Option<Edge>, P::Error> {
        let low = self.pin.is_low()?;
        if low == self.low {
            return Ok(None);
        }

        let now = self.clock.now();
        if self.last_change.elapsed(now) < self.debounce {
            return Ok(None);
        }

        self.last_change.restart(now);
        self.low = low;
        Ok(Some(if low { Edge::Falling } else { Edge::Rising }))
    }

    pub fn is_enabled(&self) -> bool {
        self.low
    }

    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::testing::{
        ManualClock,
        MockPin,
    };

    #[test]
    fn initial_state_follows_pin() {
        let clock = ManualClock::new();
        let level = Cell::new(false);
        let switch = RockerSwitch::new(MockPin { high: &level }, &clock, DEFAULT_DEBOUNCE).unwrap();
        assert!(switch.is_enabled());

        level.set(true);
        let switch = RockerSwitch::new(MockPin { high: &level }, &clock, DEFAULT_DEBOUNCE).unwrap();
        assert!(!switch.is_enabled());
    }

    #[test]
    fn falling_edge_enables_rising_edge_disables() {
        let clock = ManualClock::new();
        let level = Cell::new(true);
        let mut switch = RockerSwitch::new(MockPin { high: &level }, &clock, DEFAULT_DEBOUNCE).unwrap();

        clock.advance_us(10_000);
        assert_eq!(switch.poll().unwrap(), None);

        level.set(false);
        assert_eq!(switch.poll().unwrap(), Some(Edge::Falling));
        assert!(switch.is_enabled());
        assert_eq!(switch.poll().unwrap(), None);

        clock.advance_us(5_000);
        level.set(true);
        assert_eq!(switch.poll().unwrap(), Some(Edge::Rising));
        assert!(!switch.is_enabled());
    }

    #[test]
    fn chatter_inside_lockout_is_ignored() {
        let clock = ManualClock::new();
        let level = Cell::new(true);
        let mut switch = RockerSwitch::new(MockPin { high: &level }, &clock, DEFAULT_DEBOUNCE).unwrap();

        clock.advance_us(6_000);
        level.set(false);
        assert_eq!(switch.poll().unwrap(), Some(Edge::Falling));

        // Contact bounce right after the accepted edge.
        for _ in 0..4 {
            clock.advance_us(1_000);
            level.set(!level.get());
            assert_eq!(switch.poll().unwrap(), None);
            assert!(switch.is_enabled());
        }

        // Bounce settled high: accepted once the lockout has run out.
        level.set(true);
        clock.advance_us(1_000);
        assert_eq!(switch.poll().unwrap(), Some(Edge::Rising));
    }

    #[test]
    fn change_right_after_power_up_waits_for_lockout() {
        let clock = ManualClock::new();
        let level = Cell::new(true);
        let mut switch = RockerSwitch::new(MockPin { high: &level }, &clock, DEFAULT_DEBOUNCE).unwrap();

        level.set(false);
        clock.advance_us(4_999);
        assert_eq!(switch.poll().unwrap(), None);
        clock.advance_us(1);
        assert_eq!(switch.poll().unwrap(), Some(Edge::Falling));
    }
}
