//! Drives the actuator with the knob-controlled sawtooth while the rocker
//! switch is on.

#![no_std]
#![no_main]

use defmt::{
    error,
    info,
};
use embassy_executor::Spawner;
use esp_backtrace as _;
use esp_hal::{
    gpio::Input,
    timer::timg::TimerGroup,
};
use esp_println as _;
use haptic_sawtooth::{
    DriverConfig,
    Generator,
    GeneratorConfig,
    HapticDriver,
    RockerSwitch,
    board::{
        self,
        ANALOG_RESOLUTION,
        EmbassyClock,
    },
    split_resources,
};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = board::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let config = GeneratorConfig::default().with_resolution(ANALOG_RESOLUTION);
    let io = board::channels(resources.pots, resources.outputs, &config);
    let generator = Generator::new(config, io, EmbassyClock).unwrap();

    let driver_config = DriverConfig::default();
    let rocker: Input<'static> = resources.rocker.into();
    let switch = RockerSwitch::new(rocker, EmbassyClock, driver_config.debounce).unwrap();

    let mut driver = HapticDriver::new(generator, switch, driver_config);
    info!("Haptic driver running — rocker switch toggles output");

    loop {
        if let Err(err) = driver.poll() {
            error!("poll failed: {}", defmt::Debug2Format(&err));
        }
        embassy_futures::yield_now().await;
    }
}
