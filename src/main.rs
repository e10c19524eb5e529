//! Tilt indicator firmware entry point.
//!
//! Target: nRF52840 with a 64×48 SSD1306 OLED and a LIS3DH on one I²C
//! bus, plus one push button.
//!
//! Task layout:
//! - Button edge task on an interrupt-priority executor (EGU1_SWI1), so
//!   edges are timestamped while the main cycle is busy-waiting a hold
//! - Main cycle on the thread executor: gesture → mode → sensor → frame,
//!   every `CYCLE_PERIOD_MS`

#![no_std]
#![no_main]

mod drivers;

use core::cell::RefCell;

use defmt::{info, unwrap, warn};
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Delay, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use panic_probe as _;
use static_cell::StaticCell;

use tilt_indicator::app::{self, TiltIndicator};
use tilt_indicator::config;
use tilt_indicator::gesture::{BusyWaitHold, GestureTiming, Press};

use drivers::button::{self, MonotonicClock, EDGES, LEVEL};
use drivers::display::{self, MicroOled};
use drivers::imu::Lis3dh;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

static EDGE_EXECUTOR: InterruptExecutor = InterruptExecutor::new();
static I2C_BUS: StaticCell<RefCell<Twim<'static, TWISPI0>>> = StaticCell::new();

#[interrupt]
unsafe fn EGU1_SWI1() {
    unsafe { EDGE_EXECUTOR.on_interrupt() }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    // GPIOTE and the RTC must preempt the edge executor's priority.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);

    info!("tilt-indicator firmware starting");

    // ═══════════════════════════════════════════════════════════════
    // Button
    // ═══════════════════════════════════════════════════════════════

    interrupt::EGU1_SWI1.set_priority(Priority::P3);
    let edge_spawner = EDGE_EXECUTOR.start(interrupt::EGU1_SWI1);
    let button_pin = Input::new(p.P0_11, Pull::Up);
    unwrap!(edge_spawner.spawn(button::edge_task(button_pin)));

    // ═══════════════════════════════════════════════════════════════
    // I²C devices
    // ═══════════════════════════════════════════════════════════════

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let twim = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let bus = I2C_BUS.init(RefCell::new(twim));

    let mut delay = Delay;

    let mut oled = MicroOled::new(RefCellDevice::new(bus));
    app::bring_up(
        &mut delay,
        config::BRING_UP_RETRY_MS,
        || oled.begin(),
        |attempt, e| warn!("Display init failed (attempt {}): {}", attempt, e),
    );
    info!("Display ready: {}", display::NAME);

    let mut imu = Lis3dh::new(RefCellDevice::new(bus), config::I2C_ADDR_ACCEL);
    app::bring_up(
        &mut delay,
        config::BRING_UP_RETRY_MS,
        || imu.begin(),
        |attempt, e| warn!("Accelerometer init failed (attempt {}): {}", attempt, e),
    );

    let mut indicator = TiltIndicator::new(&EDGES, GestureTiming::default(), imu, oled);
    if let Err(e) = indicator.splash() {
        defmt::panic!("Splash frame failed: {}", e);
    }

    let mut hold = BusyWaitHold::new(&LEVEL, MonotonicClock);
    info!("Ready, mode: {}", indicator.mode().as_str());

    // ═══════════════════════════════════════════════════════════════
    // Main cycle
    // ═══════════════════════════════════════════════════════════════

    loop {
        match indicator.cycle(button::now_ms(), &mut hold) {
            Ok(report) => {
                if report.press != Press::None {
                    info!("{} -> Current State: {}", report.press, report.mode.as_str());
                }
            }
            Err(e) => defmt::panic!("Cycle failed: {}", e),
        }

        Timer::after_millis(config::CYCLE_PERIOD_MS).await;
    }
}
