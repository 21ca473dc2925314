//! Non-blocking sawtooth generator.
//!
//! The generator never waits. Each call to [`Generator::step`] refreshes the
//! amplitude, frequency and offset from the potentiometers, advances the
//! hold/decay state machine by at most one event and writes the result. How
//! closely the output tracks a real sawtooth depends entirely on how often the
//! caller polls it.

use crate::{
    clock::{
        Clock,
        Duration,
        Instant,
        Stopwatch,
    },
    config::GeneratorConfig,
    error::GeneratorError,
    frequency::{
        self,
        FrequencyRange,
    },
    io::{
        Control,
        HapticIo,
        Output,
    },
};

/// Which half of the sawtooth the generator is producing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Output pinned at the amplitude ceiling.
    HoldingHigh,
    /// Output stepping down toward zero.
    Decaying,
}

/// Sawtooth generator driving one actuator.
pub struct Generator<IO, C> {
    io: IO,
    clock: C,
    frequency_range: FrequencyRange,
    max_count: u16,
    zero_value: u16,

    phase: Phase,
    amplitude_ceiling: u16,
    ramp_counter: f32,
    decrement_step: f32,
    decrement_interval: Duration,
    target_hz: Option<f32>,

    decrement_clock: Stopwatch,
    // `None` until the hold phase is first entered.
    hold_clock: Option<Stopwatch>,
}

impl<IO, C> Generator<IO, C>
where
    IO: HapticIo,
    C: Clock,
{
    /// Takes ownership of the analog channels and parks both outputs at the
    /// zero-current value.
    pub fn new(config: GeneratorConfig, io: IO, clock: C) -> Result<Self, GeneratorError<IO::Error>> {
        config.validate()?;

        let now = clock.now();
        let mut generator = Self {
            io,
            clock,
            frequency_range: config.frequency_range(),
            max_count: config.max_count(),
            zero_value: config.zero_value(),
            phase: Phase::HoldingHigh,
            amplitude_ceiling: 0,
            ramp_counter: 0.0,
            decrement_step: 1.0,
            decrement_interval: config.decrement_interval(),
            target_hz: None,
            decrement_clock: Stopwatch::started_at(now),
            hold_clock: None,
        };
        generator.zero().map_err(GeneratorError::Output)?;

        debug!(
            "generator ready: max_count={} zero={} interval={}us",
            generator.max_count,
            generator.zero_value,
            generator.decrement_interval.ticks()
        );
        Ok(generator)
    }

    /// Advances the waveform by one poll and returns the drive value written.
    ///
    /// `hold` is how long the peak is held before each decay. With
    /// `decrement_interval` set, the decay tick spacing is fixed and the
    /// frequency knob is ignored; with `None` the knob sets the decrement
    /// step for the current spacing. A zero interval decrements on every poll
    /// and keeps the step it had; it stays in force for later `None` polls
    /// until another interval is passed.
    pub fn step(&mut self, hold: Duration, decrement_interval: Option<Duration>) -> Result<u16, IO::Error> {
        match decrement_interval {
            Some(interval) => {
                self.decrement_interval = interval;
                self.target_hz = None;
            }
            None => self.update_frequency(),
        }
        self.update_amplitude();
        self.update_offset()?;

        let now = self.clock.now();
        let output = self.advance(now, hold);
        self.io.write(Output::Drive, output)?;
        Ok(output)
    }

    /// Parks both outputs at the zero-current value.
    ///
    /// Phase, ramp and timers are left alone so the next [`step`](Self::step)
    /// picks up where the waveform stopped.
    pub fn zero(&mut self) -> Result<(), IO::Error> {
        self.io.write(Output::Drive, self.zero_value)?;
        self.io.write(Output::Offset, self.zero_value)
    }

    fn update_frequency(&mut self) {
        // No spacing to spread a cycle over.
        if self.decrement_interval.ticks() == 0 {
            return;
        }
        let reading = self.io.read(Control::Frequency);
        let target_hz = self.frequency_range.target_hz(reading, self.max_count);
        self.decrement_step =
            frequency::decrement_step(target_hz, self.decrement_interval, self.amplitude_ceiling);
        self.target_hz = Some(target_hz);
    }

    fn update_amplitude(&mut self) {
        self.amplitude_ceiling = self.io.read(Control::Amplitude).min(self.max_count);
        // A lowered knob takes effect mid-decay.
        self.ramp_counter = self.ramp_counter.min(f32::from(self.amplitude_ceiling));
    }

    fn update_offset(&mut self) -> Result<(), IO::Error> {
        let offset = self.io.read(Control::Offset).min(self.max_count);
        self.io.write(Output::Offset, offset)
    }

    fn advance(&mut self, now: Instant, hold: Duration) -> u16 {
        match self.phase {
            Phase::HoldingHigh => {
                let hold_clock = self.hold_clock.get_or_insert(Stopwatch::started_at(now));
                if hold_clock.elapsed(now) >= hold {
                    self.enter_decay();
                }
                self.amplitude_ceiling
            }
            Phase::Decaying => {
                if self.decrement_clock.elapsed(now) >= self.decrement_interval && self.ramp_counter > 0.0 {
                    self.ramp_counter = (self.ramp_counter - self.decrement_step).max(0.0);
                    self.decrement_clock.restart(now);
                }
                let output = self.ramp_counter as u16;
                if self.ramp_counter <= 0.0 {
                    self.enter_hold(now);
                }
                output
            }
        }
    }

    fn enter_decay(&mut self) {
        self.phase = Phase::Decaying;
        self.ramp_counter = f32::from(self.amplitude_ceiling);
        self.hold_clock = None;
        trace!("decay from {} by {}", self.amplitude_ceiling, self.decrement_step);
    }

    fn enter_hold(&mut self, now: Instant) {
        self.phase = Phase::HoldingHigh;
        self.hold_clock = Some(Stopwatch::started_at(now));
        trace!("hold at {}", self.amplitude_ceiling);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn amplitude_ceiling(&self) -> u16 {
        self.amplitude_ceiling
    }

    pub fn ramp_counter(&self) -> f32 {
        self.ramp_counter
    }

    pub fn decrement_step(&self) -> f32 {
        self.decrement_step
    }

    pub fn decrement_interval(&self) -> Duration {
        self.decrement_interval
    }

    /// Frequency last derived from the knob, if any.
    pub fn target_hz(&self) -> Option<f32> {
        self.target_hz
    }

    pub fn max_count(&self) -> u16 {
        self.max_count
    }

    pub fn zero_value(&self) -> u16 {
        self.zero_value
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Gives back the hardware handle and clock.
    pub fn release(self) -> (IO, C) {
        (self.io, self.clock)
    }
}
