//! GPIO button input on GPIOTE.
//!
//! One active-low tactile switch with internal pull-up.  The edge task
//! runs on the interrupt-priority executor: it wakes on every GPIOTE
//! edge and feeds press/release transitions to the library's
//! `EdgeHandler`, which debounces, latches and publishes the level.
//!
//! The main cycle reads only [`EDGES`] and [`LEVEL`], both atomic.

use defmt::trace;
use embassy_nrf::gpio::Input;
use embassy_time::Instant;
use tilt_indicator::config::BUTTON_DEBOUNCE_MS;
use tilt_indicator::gesture::{ButtonLevel, EdgeHandler, EdgeLatch};
use tilt_indicator::hw::Clock;

/// Pending press edge, produced by [`edge_task`], consumed by the main cycle.
pub static EDGES: EdgeLatch = EdgeLatch::new(BUTTON_DEBOUNCE_MS);

/// Line level and last release time as seen by [`edge_task`].
pub static LEVEL: ButtonLevel = ButtonLevel::new();

/// Milliseconds since boot (wraps at ~49 days - the classifier only
/// compares differences).
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Embassy time driver as the classifier's clock.
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u32 {
        now_ms()
    }
}

/// Watch the button forever.
///
/// Waits on any edge and reads the level after waking: a press is the
/// line going low (falling edge), a release the line going high.
#[embassy_executor::task]
pub async fn edge_task(mut button: Input<'static>) -> ! {
    let mut handler = EdgeHandler::new(&EDGES, &LEVEL, BUTTON_DEBOUNCE_MS);
    if button.is_low() {
        LEVEL.set_pressed();
    }

    loop {
        button.wait_for_any_edge().await;
        let now = now_ms();

        if button.is_low() {
            if handler.on_press(now) {
                trace!("Button: press edge at {} ms", now);
            }
        } else {
            handler.on_release(now);
        }
    }
}
