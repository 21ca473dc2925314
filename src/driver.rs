//! Polling loop glue: step the generator while the switch is on, park the
//! outputs while it is off.

use embedded_hal::digital::InputPin;

use crate::{
    clock::{
        Clock,
        Duration,
    },
    error::DriverError,
    generator::Generator,
    io::HapticIo,
    switch::{
        DEFAULT_DEBOUNCE,
        Edge,
        RockerSwitch,
    },
};

/// How the driver calls into the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// Time at peak before each decay.
    pub hold: Duration,
    /// Fixed decay tick spacing, or `None` to let the frequency knob set the
    /// decay rate. Must be non-zero when set.
    pub decrement_interval: Option<Duration>,
    /// Switch lockout.
    pub debounce: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            hold: Duration::micros(0),
            decrement_interval: None,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// A generator gated by a rocker switch.
pub struct HapticDriver<IO, P, C> {
    generator: Generator<IO, C>,
    switch: RockerSwitch<P, C>,
    config: DriverConfig,
}

impl<IO, P, C> HapticDriver<IO, P, C>
where
    IO: HapticIo,
    P: InputPin,
    C: Clock,
{
    pub fn new(generator: Generator<IO, C>, switch: RockerSwitch<P, C>, config: DriverConfig) -> Self {
        info!("haptic driver starting {}", if switch.is_enabled() { "enabled" } else { "disabled" });
        Self {
            generator,
            switch,
            config,
        }
    }

    /// One pass of the control loop. Returns the drive value while enabled.
    pub fn poll(&mut self) -> Result<Option<u16>, DriverError<IO::Error, P::Error>> {
        match self.switch.poll().map_err(DriverError::Switch)? {
            Some(Edge::Falling) => info!("switch on, driving sawtooth"),
            Some(Edge::Rising) => info!("switch off, outputs parked"),
            None => {}
        }

        if self.switch.is_enabled() {
            let magnitude = self
                .generator
                .step(self.config.hold, self.config.decrement_interval)
                .map_err(DriverError::Output)?;
            Ok(Some(magnitude))
        } else {
            self.generator.zero().map_err(DriverError::Output)?;
            Ok(None)
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.switch.is_enabled()
    }

    pub fn generator(&self) -> &Generator<IO, C> {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut Generator<IO, C> {
        &mut self.generator
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }
}
