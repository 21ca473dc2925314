//! Microsecond time base for the polling loop.
//!
//! Everything that measures elapsed time goes through [`Clock`], so tests can
//! drive time by hand instead of waiting on hardware.

/// A point in time with microsecond ticks.
pub type Instant = fugit::TimerInstantU64<1_000_000>;

/// A span of time with microsecond ticks.
pub type Duration = fugit::MicrosDurationU64;

/// A monotonic, free-running microsecond counter.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Elapsed-time counter that is reset to zero when its event fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub const fn started_at(now: Instant) -> Self {
        Self { started: now }
    }

    pub fn restart(&mut self, now: Instant) {
        self.started = now;
    }

    /// Time since the last restart. Saturates at zero if `now` is earlier.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.checked_duration_since(self.started)
            .unwrap_or(Duration::from_ticks(0))
    }
}
