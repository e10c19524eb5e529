//! The main cycle: button → mode → sensor → frame.
//!
//! [`TiltIndicator::cycle`] is one iteration; the caller owns the
//! cadence (the firmware sleeps `CYCLE_PERIOD_MS` between calls) and
//! the logging.

use embedded_hal::delay::DelayNs;

use crate::error::Error;
use crate::gesture::{EdgeLatch, GestureClassifier, GestureTiming, HoldStrategy, Press};
use crate::hw::{Accelerometer, Display};
use crate::mode::{DisplayMode, ModeStateMachine};
use crate::orientation::{self, OrientationSample, Vector3};
use crate::render::Renderer;

/// What happened during one cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Classification consumed this cycle.
    pub press: Press,
    /// Mode the frame was drawn in.
    pub mode: DisplayMode,
    pub accel: Vector3,
    pub orientation: OrientationSample,
}

/// Classifier, mode machine, and renderer wired to one sensor and one
/// display.
pub struct TiltIndicator<'a, A, D> {
    classifier: GestureClassifier<'a>,
    modes: ModeStateMachine,
    renderer: Renderer,
    accel: A,
    display: D,
}

impl<'a, A: Accelerometer, D: Display> TiltIndicator<'a, A, D> {
    /// Both devices must already be brought up.
    pub fn new(edges: &'a EdgeLatch, timing: GestureTiming, accel: A, display: D) -> Self {
        let renderer = Renderer::for_display(&display);
        Self {
            classifier: GestureClassifier::new(edges, timing),
            modes: ModeStateMachine::new(),
            renderer,
            accel,
            display,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.modes.mode()
    }

    pub fn classifier(&self) -> &GestureClassifier<'a> {
        &self.classifier
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn accelerometer_mut(&mut self) -> &mut A {
        &mut self.accel
    }

    /// Boot self-test frame.
    pub fn splash(&mut self) -> Result<(), Error> {
        self.renderer.splash(&mut self.display)
    }

    /// Run one cycle at `now_ms`.
    ///
    /// May block inside `hold` while the button is held.  A sensor or
    /// display error aborts the cycle and is returned as is.
    pub fn cycle<H: HoldStrategy>(&mut self, now_ms: u32, hold: &mut H) -> Result<CycleReport, Error> {
        let press = self.classifier.poll(now_ms, hold);
        let mode = self.modes.apply(press);

        let accel = self.accel.read_vector()?;
        let orientation = orientation::estimate(accel);

        self.renderer
            .render(&mut self.display, mode, &accel, &orientation)?;

        Ok(CycleReport {
            press,
            mode,
            accel,
            orientation,
        })
    }
}

/// Retry `attempt` every `retry_ms` until it succeeds.
///
/// `on_failure` sees the 1-based attempt number and the error, for
/// diagnostics.  Never gives up: the firmware has nothing useful to do
/// without its devices.
pub fn bring_up<T, Del, F, L>(delay: &mut Del, retry_ms: u32, mut attempt: F, mut on_failure: L) -> T
where
    Del: DelayNs,
    F: FnMut() -> Result<T, Error>,
    L: FnMut(u32, Error),
{
    let mut tries: u32 = 0;
    loop {
        tries = tries.wrapping_add(1);
        match attempt() {
            Ok(device) => return device,
            Err(e) => {
                on_failure(tries, e);
                delay.delay_ms(retry_ms);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Hold;

    struct NoDelay(u32);

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0 += ns / 1_000_000;
        }
    }

    struct Flat;

    impl Accelerometer for Flat {
        fn read_vector(&mut self) -> Result<Vector3, Error> {
            Ok(Vector3::new(0.0, 0.0, 1.0))
        }
    }

    struct Unplugged;

    impl Accelerometer for Unplugged {
        fn read_vector(&mut self) -> Result<Vector3, Error> {
            Err(Error::Bus)
        }
    }

    #[derive(Default)]
    struct Blank {
        presented: u32,
    }

    impl Display for Blank {
        fn width(&self) -> u32 {
            64
        }
        fn height(&self) -> u32 {
            48
        }
        fn font_height(&self) -> u32 {
            8
        }
        fn clear(&mut self) {}
        fn draw_pixel(&mut self, _x: i32, _y: i32) {}
        fn draw_text(&mut self, _x: i32, _y: i32, _text: &str) {}
        fn present(&mut self) -> Result<(), Error> {
            self.presented += 1;
            Ok(())
        }
    }

    struct Tap;

    impl HoldStrategy for Tap {
        fn wait_for_release(&mut self, start: u32, _long: u32) -> Hold {
            Hold::Released { at_ms: start + 80 }
        }
    }

    #[test]
    fn bring_up_retries_until_ready() {
        let mut delay = NoDelay(0);
        let mut failures = 0;
        let mut left = 3;
        let value = bring_up(
            &mut delay,
            500,
            || {
                if left == 0 {
                    Ok(42)
                } else {
                    left -= 1;
                    Err(Error::SensorUnavailable)
                }
            },
            |attempt, e| {
                failures += 1;
                assert_eq!(attempt, failures);
                assert_eq!(e, Error::SensorUnavailable);
            },
        );
        assert_eq!(value, 42);
        assert_eq!(failures, 3);
        assert_eq!(delay.0, 1500);
    }

    #[test]
    fn bring_up_ready_first_time_does_not_wait() {
        let mut delay = NoDelay(0);
        let value = bring_up(&mut delay, 500, || Ok("oled"), |_, _| panic!("no failure expected"));
        assert_eq!(value, "oled");
        assert_eq!(delay.0, 0);
    }

    #[test]
    fn cycle_presents_one_frame() {
        let edges = EdgeLatch::default();
        let mut app = TiltIndicator::new(&edges, GestureTiming::default(), Flat, Blank::default());
        let report = app.cycle(1000, &mut Tap).unwrap();
        assert_eq!(report.press, Press::None);
        assert_eq!(report.mode, DisplayMode::Off);
        assert_eq!(report.orientation.scale_x, 0);
        assert_eq!(app.display().presented, 1);
    }

    #[test]
    fn sensor_failure_aborts_cycle() {
        let edges = EdgeLatch::default();
        let mut app = TiltIndicator::new(&edges, GestureTiming::default(), Unplugged, Blank::default());
        assert_eq!(app.cycle(1000, &mut Tap), Err(Error::Bus));
        assert_eq!(app.display().presented, 0);
    }

    #[test]
    fn mode_updates_before_the_frame() {
        let edges = EdgeLatch::default();
        let mut app = TiltIndicator::new(&edges, GestureTiming::default(), Flat, Blank::default());

        edges.record(1000);
        app.cycle(1000, &mut Tap).unwrap();
        edges.record(1300);
        let report = app.cycle(1310, &mut Tap).unwrap();
        assert_eq!(report.press, Press::Double);
        assert_eq!(report.mode, DisplayMode::TwoAxis);
        assert_eq!(app.mode(), DisplayMode::TwoAxis);
    }
}
