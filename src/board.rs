//! ESP32-S3 bring-up.
//!
//! The S3 has no DAC, so both analog outputs are LEDC PWM channels feeding RC
//! filters in front of the power stage. The three potentiometers are on ADC1.

use esp_hal::{
    Blocking,
    analog::adc::{
        Adc,
        AdcConfig,
        AdcPin,
        Attenuation,
    },
    assign_resources,
    clock::CpuClock,
    gpio::{
        DriveMode,
        Input,
        InputConfig,
        Pull,
    },
    ledc::{
        LSGlobalClkSource,
        Ledc,
        LowSpeed,
        channel::{
            self,
            ChannelIFace,
        },
        timer::{
            self,
            TimerIFace,
        },
    },
    peripherals::{
        ADC1,
        GPIO1,
        GPIO2,
        GPIO3,
    },
    time::Rate,
};

use crate::{
    Channels,
    GeneratorConfig,
    Clock,
    Control,
    ControlInputs,
    Instant,
};

/// ADC1 and LEDC are both run at 12 bits.
pub const ANALOG_RESOLUTION: u8 = 12;

/// Highest LEDC rate that still fits 12 bits of duty on the 80 MHz APB clock.
const PWM_FREQUENCY_KHZ: u32 = 19;

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        pots: PotResources<'d> {
            amplitude: GPIO1,
            frequency: GPIO2,
            offset: GPIO3,
            adc: ADC1,
        },
        outputs: OutputResources<'d> {
            drive: GPIO17,
            offset: GPIO18,
            ledc: LEDC,
        },
        rocker: RockerResources<'d> {
            pin: GPIO14,
        },
    }
}

/// Analog channels as wired on the board.
pub type BoardIo = Channels<Potentiometers, channel::Channel<'static, LowSpeed>, channel::Channel<'static, LowSpeed>>;

// ── Board initialisation ────────────────────────────────────────────────────

/// Initialise the chip and return the raw peripheral set.
///
/// Call this once at the top of `main`, then use [`split_resources!`] to
/// break the peripherals into the groups above.
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}

/// Pots and both PWM outputs, ready to hand to a [`Generator`](crate::Generator)
/// built from the same `config`, whose resolution should be
/// [`ANALOG_RESOLUTION`] to match the ADC. Writes are rescaled to the 12-bit
/// LEDC timer whatever the resolution.
pub fn channels(pots: PotResources<'static>, outputs: OutputResources<'static>, config: &GeneratorConfig) -> BoardIo {
    let ledc = crate::mk_static!(Ledc<'static>, Ledc::new(outputs.ledc));
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    let pwm_timer = crate::mk_static!(timer::Timer<'static, LowSpeed>, ledc.timer::<LowSpeed>(timer::Number::Timer0));
    pwm_timer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty12Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_khz(PWM_FREQUENCY_KHZ),
        })
        .unwrap();

    let pwm_timer: &'static timer::Timer<'static, LowSpeed> = pwm_timer;
    let channel_config = || channel::config::Config {
        timer: pwm_timer,
        duty_pct: 50,
        drive_mode: DriveMode::PushPull,
    };
    let mut drive = ledc.channel(channel::Number::Channel0, outputs.drive);
    drive.configure(channel_config()).unwrap();
    let mut offset = ledc.channel(channel::Number::Channel1, outputs.offset);
    offset.configure(channel_config()).unwrap();

    Channels::new(pots.into(), drive, offset, config)
}

// ── Potentiometers ──────────────────────────────────────────────────────────

/// The three control knobs on ADC1.
///
/// Reads never wait for a conversion: a pin whose conversion is still running
/// (or queued behind another pin's) reports its previous value.
pub struct Potentiometers {
    adc: Adc<'static, ADC1<'static>, Blocking>,
    amplitude: AdcPin<GPIO1<'static>, ADC1<'static>>,
    frequency: AdcPin<GPIO2<'static>, ADC1<'static>>,
    offset: AdcPin<GPIO3<'static>, ADC1<'static>>,
    last: [u16; 3],
}

impl From<PotResources<'static>> for Potentiometers {
    fn from(res: PotResources<'static>) -> Self {
        let mut config = AdcConfig::new();
        let amplitude = config.enable_pin(res.amplitude, Attenuation::_11dB);
        let frequency = config.enable_pin(res.frequency, Attenuation::_11dB);
        let offset = config.enable_pin(res.offset, Attenuation::_11dB);
        Self {
            adc: Adc::new(res.adc, config),
            amplitude,
            frequency,
            offset,
            last: [0; 3],
        }
    }
}

impl ControlInputs for Potentiometers {
    fn read(&mut self, control: Control) -> u16 {
        let (result, slot) = match control {
            Control::Amplitude => (self.adc.read_oneshot(&mut self.amplitude), 0),
            Control::Frequency => (self.adc.read_oneshot(&mut self.frequency), 1),
            Control::Offset => (self.adc.read_oneshot(&mut self.offset), 2),
        };
        match result {
            Ok(value) => self.last[slot] = value,
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(())) => warn!("adc read failed for {}", control),
        }
        self.last[slot]
    }
}

// ── Rocker switch / clock ───────────────────────────────────────────────────

impl From<RockerResources<'static>> for Input<'static> {
    fn from(res: RockerResources<'static>) -> Self {
        Input::new(res.pin, InputConfig::default().with_pull(Pull::Up))
    }
}

/// Microsecond clock backed by the embassy time driver.
///
/// `esp_rtos::start` must have been called before the first reading.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(embassy_time::Instant::now().as_micros())
    }
}
