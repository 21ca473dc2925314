//! # haptic-sawtooth
//!
//! Sawtooth current driver for a haptic actuator.
//!
//! Three potentiometers set the waveform live:
//! - **Amplitude**: peak drive value
//! - **Frequency**: how fast the ramp decays back to zero (knob inverted)
//! - **Offset**: DC level sent to the downstream difference amplifier
//!
//! The [`Generator`] is polled from a loop and never blocks. A debounced
//! [`RockerSwitch`] decides whether the [`HapticDriver`] steps the waveform or
//! parks both outputs at zero current.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = haptic_sawtooth::board::init();
//! let resources = haptic_sawtooth::split_resources!(peripherals);
//!
//! let config = GeneratorConfig::default().with_resolution(board::ANALOG_RESOLUTION);
//! let io = haptic_sawtooth::board::channels(resources.pots, resources.outputs, &config);
//! let generator = Generator::new(config, io, EmbassyClock)?;
//! ```
//!
//! Board bring-up for the ESP32-S3 lives behind the `esp32s3` feature; the rest
//! of the crate is target-independent and tested on the host.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the other modules.
mod fmt;

#[cfg(feature = "esp32s3")]
pub mod board;
mod clock;
mod config;
mod driver;
mod error;
mod frequency;
mod generator;
mod io;
mod switch;
#[cfg(test)]
mod testing;

pub use clock::{
    Clock,
    Duration,
    Instant,
    Stopwatch,
};
pub use config::{
    DEFAULT_DECREMENT_INTERVAL,
    DEFAULT_RESOLUTION,
    GeneratorConfig,
};
pub use driver::{
    DriverConfig,
    HapticDriver,
};
pub use error::{
    ConfigError,
    DriverError,
    GeneratorError,
};
pub use frequency::{
    FrequencyRange,
    decrement_step,
};
pub use generator::{
    Generator,
    Phase,
};
pub use io::{
    Channels,
    Control,
    ControlInputs,
    HapticIo,
    Output,
};
pub use switch::{
    DEFAULT_DEBOUNCE,
    Edge,
    RockerSwitch,
};

/// StaticCell helper — allocates a value into a `static` exactly once.
#[cfg(feature = "esp32s3")]
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}
