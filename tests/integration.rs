//! End-to-end scenarios for tilt_indicator host-testable logic.
//!
//! The full cycle runs against a recording 64×48 display, a settable
//! accelerometer and a scripted button hold.

use std::cell::Cell;
use std::collections::{BTreeSet, VecDeque};

use tilt_indicator::app::TiltIndicator;
use tilt_indicator::config::BUTTON_DEBOUNCE_MS;
use tilt_indicator::gesture::{
    BusyWaitHold, ButtonLevel, EdgeHandler, EdgeLatch, GestureTiming, Hold, HoldStrategy, Press,
};
use tilt_indicator::hw::{Accelerometer, Clock, Display};
use tilt_indicator::mode::DisplayMode;
use tilt_indicator::orientation::Vector3;
use tilt_indicator::Error;

struct Sensor(Vector3);

impl Accelerometer for Sensor {
    fn read_vector(&mut self) -> Result<Vector3, Error> {
        Ok(self.0)
    }
}

/// Keeps the last presented frame.
#[derive(Default)]
struct Panel {
    drawing: BTreeSet<(i32, i32)>,
    drawing_text: Vec<(i32, String)>,
    shown: BTreeSet<(i32, i32)>,
    shown_text: Vec<(i32, String)>,
    frames: usize,
}

impl Display for Panel {
    fn width(&self) -> u32 {
        64
    }
    fn height(&self) -> u32 {
        48
    }
    fn font_height(&self) -> u32 {
        8
    }
    fn clear(&mut self) {
        self.drawing.clear();
        self.drawing_text.clear();
    }
    fn draw_pixel(&mut self, x: i32, y: i32) {
        if (0..64).contains(&x) && (0..48).contains(&y) {
            self.drawing.insert((x, y));
        }
    }
    fn draw_text(&mut self, _x: i32, y: i32, text: &str) {
        self.drawing_text.push((y, text.to_string()));
    }
    fn present(&mut self) -> Result<(), Error> {
        self.shown = self.drawing.clone();
        self.shown_text = self.drawing_text.clone();
        self.frames += 1;
        Ok(())
    }
}

/// Button holds in the order they will be asked for.
#[derive(Default)]
struct Script(VecDeque<Hold>);

impl Script {
    fn tap(&mut self, released_at: u32) {
        self.0.push_back(Hold::Released { at_ms: released_at });
    }

    fn long(&mut self) {
        self.0.push_back(Hold::Long);
    }
}

impl HoldStrategy for Script {
    fn wait_for_release(&mut self, _start: u32, _long: u32) -> Hold {
        self.0.pop_front().expect("unscripted hold")
    }
}

/// Clock the test moves by hand.
struct Wall<'c>(&'c Cell<u32>);

impl Clock for Wall<'_> {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

const FLAT: Vector3 = Vector3::new(0.0, 0.0, 1.0);

fn indicator(edges: &EdgeLatch) -> TiltIndicator<'_, Sensor, Panel> {
    TiltIndicator::new(edges, GestureTiming::default(), Sensor(FLAT), Panel::default())
}

#[test]
fn double_press_shows_arrows_and_long_press_blanks() {
    let edges = EdgeLatch::new(BUTTON_DEBOUNCE_MS);
    let mut app = indicator(&edges);
    let mut hold = Script::default();

    // Boot: off, nothing lit.
    let report = app.cycle(250, &mut hold).unwrap();
    assert_eq!(report.mode, DisplayMode::Off);
    assert!(app.display().shown.is_empty());

    // First tap waits for a partner.
    edges.record(1000);
    hold.tap(1080);
    assert_eq!(app.cycle(1000, &mut hold).unwrap().press, Press::None);
    assert!(app.classifier().is_awaiting_second_press());

    // Second tap completes the double press; the device now leans right.
    app.accelerometer_mut().0 = Vector3::new(1.0, 0.0, 1.0);
    edges.record(1300);
    hold.tap(1380);
    let report = app.cycle(1300, &mut hold).unwrap();
    assert_eq!(report.press, Press::Double);
    assert_eq!(report.mode, DisplayMode::TwoAxis);
    assert_eq!(report.orientation.scale_x, 6);
    assert_eq!(report.orientation.scale_y, 0);

    let frame = &app.display().shown;
    assert_eq!(frame.len(), 36);
    assert!(frame.contains(&(54, 24)));
    assert!(frame.contains(&(49, 29)));
    assert!(frame.contains(&(49, 19)));
    assert!(!frame.contains(&(55, 24)));
    assert!(!frame.contains(&(10, 24)));

    // Long press turns it off from any mode.
    edges.record(3000);
    hold.long();
    let report = app.cycle(3000, &mut hold).unwrap();
    assert_eq!(report.press, Press::Long);
    assert_eq!(app.mode(), DisplayMode::Off);
    assert!(app.display().shown.is_empty());
    assert!(!app.classifier().is_awaiting_second_press());
}

#[test]
fn lone_tap_is_a_single_and_leaves_the_mode_alone() {
    let edges = EdgeLatch::new(BUTTON_DEBOUNCE_MS);
    let mut app = indicator(&edges);
    let mut hold = Script::default();

    edges.record(1000);
    hold.tap(1100);
    assert_eq!(app.cycle(1000, &mut hold).unwrap().press, Press::None);
    assert_eq!(app.cycle(1250, &mut hold).unwrap().press, Press::None);
    let report = app.cycle(1750, &mut hold).unwrap();
    assert_eq!(report.press, Press::Single);
    assert_eq!(report.mode, DisplayMode::Off);

    // Reported once.
    assert_eq!(app.cycle(2000, &mut hold).unwrap().press, Press::None);
}

#[test]
fn contact_bounce_collapses_into_one_press() {
    let edges = EdgeLatch::new(BUTTON_DEBOUNCE_MS);
    let level = ButtonLevel::new();
    let mut handler = EdgeHandler::new(&edges, &level, BUTTON_DEBOUNCE_MS);
    let mut app = indicator(&edges);
    let mut hold = Script::default();

    // Press chatter, then release chatter.
    assert!(handler.on_press(1000));
    handler.on_release(1005);
    assert!(!handler.on_press(1012));
    handler.on_release(1090);
    assert!(!handler.on_press(1110));
    handler.on_release(1115);

    hold.tap(1115);
    assert_eq!(app.cycle(1120, &mut hold).unwrap().press, Press::None);
    assert!(hold.0.is_empty());

    // Nothing else was latched, so the tap ends as a single press.
    assert_eq!(app.cycle(1700, &mut hold).unwrap().press, Press::Single);
    assert_eq!(app.mode(), DisplayMode::Off);
}

#[test]
fn four_double_presses_cycle_through_raw_data() {
    let edges = EdgeLatch::new(BUTTON_DEBOUNCE_MS);
    let mut app = indicator(&edges);
    let mut hold = Script::default();

    let expected = [
        DisplayMode::TwoAxis,
        DisplayMode::XAxisOnly,
        DisplayMode::YAxisOnly,
        DisplayMode::RawData,
        DisplayMode::TwoAxis,
    ];
    let mut t = 1000;
    for mode in expected {
        edges.record(t);
        hold.tap(t + 60);
        app.cycle(t, &mut hold).unwrap();
        edges.record(t + 200);
        hold.tap(t + 260);
        let report = app.cycle(t + 200, &mut hold).unwrap();
        assert_eq!(report.press, Press::Double);
        assert_eq!(report.mode, mode);

        if mode == DisplayMode::RawData {
            let panel = app.display();
            assert!(panel.shown.is_empty());
            assert_eq!(
                panel.shown_text,
                vec![
                    (4, "AX:0.000".to_string()),
                    (20, "AY:0.000".to_string()),
                    (36, "AZ:1.000".to_string()),
                ]
            );
        }
        t += 2000;
    }
}

#[test]
fn splash_lights_the_whole_panel_then_clears() {
    let edges = EdgeLatch::new(BUTTON_DEBOUNCE_MS);
    let mut app = indicator(&edges);
    app.splash().unwrap();
    assert_eq!(app.display().frames, 1);
    assert_eq!(app.display().shown.len(), 64 * 48);
    assert!(app.display().drawing.is_empty());
}

/// Two quick taps where each cycle only runs after the tap is over.
///
/// Returns what the cycle after the second tap reported.
fn taps_seen_late(second_press_at: u32) -> (Press, DisplayMode) {
    let edges = EdgeLatch::new(BUTTON_DEBOUNCE_MS);
    let level = ButtonLevel::new();
    let mut handler = EdgeHandler::new(&edges, &level, BUTTON_DEBOUNCE_MS);
    let mut app = indicator(&edges);
    let now = Cell::new(0);

    handler.on_press(1000);
    handler.on_release(1050);
    now.set(1240);
    let mut hold = BusyWaitHold::new(&level, Wall(&now));
    assert_eq!(app.cycle(1240, &mut hold).unwrap().press, Press::None);

    handler.on_press(second_press_at);
    handler.on_release(second_press_at + 40);
    now.set(second_press_at + 200);
    let report = app.cycle(second_press_at + 200, &mut hold).unwrap();
    (report.press, report.mode)
}

#[test]
fn partner_inside_window_from_real_release_is_double() {
    assert_eq!(taps_seen_late(1500), (Press::Double, DisplayMode::TwoAxis));
}

#[test]
fn partner_outside_window_from_real_release_is_single() {
    assert_eq!(taps_seen_late(1600), (Press::Single, DisplayMode::Off));
}

#[test]
fn late_cycle_does_not_delay_the_single_timeout() {
    let edges = EdgeLatch::new(BUTTON_DEBOUNCE_MS);
    let level = ButtonLevel::new();
    let mut handler = EdgeHandler::new(&edges, &level, BUTTON_DEBOUNCE_MS);
    let mut app = indicator(&edges);
    let now = Cell::new(1240);
    let mut hold = BusyWaitHold::new(&level, Wall(&now));

    handler.on_press(1000);
    handler.on_release(1050);
    assert_eq!(app.cycle(1240, &mut hold).unwrap().press, Press::None);

    // 500 ms after the release the window has closed.
    assert_eq!(app.cycle(1490, &mut hold).unwrap().press, Press::None);
    assert_eq!(app.cycle(1560, &mut hold).unwrap().press, Press::Single);
}
