//! Frame rendering for each display mode.
//!
//! The tilt indicator is one filled isosceles triangle per axis.  Its
//! apex sits a fixed margin away from the display center and its leg
//! length is the axis scale, so a stronger tilt grows the arrow back
//! towards the center:
//!
//! ```text
//!   Right, leg 3, apex at (x, y):
//!
//!       x-2 x-1  x
//!   y-2  #
//!   y-1  #   #
//!   y    #   #   #
//!   y+1  #   #
//!   y+2  #
//! ```

use core::fmt::Write;

use crate::config::{
    RAW_DATA_LINES, REFERENCE_ARROW_MARGIN, REFERENCE_HEIGHT, REFERENCE_WIDTH,
};
use crate::error::Error;
use crate::hw::Display;
use crate::mode::DisplayMode;
use crate::orientation::{OrientationSample, Vector3};

/// Which way an arrow points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Horizontal arrow for an X scale: positive points right.
    pub fn for_x(scale: i8) -> Self {
        if scale > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    /// Vertical arrow for a Y scale: positive points up.
    pub fn for_y(scale: i8) -> Self {
        if scale > 0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Draw a filled triangle with its apex at (`x`, `y`) pointing `dir`.
///
/// Row `i` of `0..size` lies `i` pixels behind the apex and spans
/// `2 * i + 1` pixels.
pub fn draw_triangle<D: Display>(display: &mut D, x: i32, y: i32, size: u8, dir: Direction) {
    for i in 0..size as i32 {
        for j in 0..=i {
            match dir {
                Direction::Up => {
                    display.draw_pixel(x + j, y + i);
                    display.draw_pixel(x - j, y + i);
                }
                Direction::Down => {
                    display.draw_pixel(x + j, y - i);
                    display.draw_pixel(x - j, y - i);
                }
                Direction::Right => {
                    display.draw_pixel(x - i, y + j);
                    display.draw_pixel(x - i, y - j);
                }
                Direction::Left => {
                    display.draw_pixel(x + i, y + j);
                    display.draw_pixel(x + i, y - j);
                }
            }
        }
    }
}

/// Pixel positions derived from the display geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    pub center_x: i32,
    pub center_y: i32,
    /// Horizontal distance from center to the left/right arrow apex.
    pub margin_x: i32,
    /// Vertical distance from center to the up/down arrow apex.
    pub margin_y: i32,
    /// Top of the middle raw-data line.
    pub text_y: i32,
    /// Distance between raw-data lines.
    pub line_pitch: i32,
}

impl Layout {
    pub fn new(width: u32, height: u32, font_height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;
        let fh = font_height as i32;

        let text_y = (h - fh) / 2;
        // Two font heights apart, squeezed if three lines would not fit.
        let line_pitch = (2 * fh).min(text_y).max(fh);

        Self {
            center_x: w / 2,
            center_y: h / 2,
            margin_x: (REFERENCE_ARROW_MARGIN * width / REFERENCE_WIDTH) as i32,
            margin_y: (REFERENCE_ARROW_MARGIN * height / REFERENCE_HEIGHT) as i32,
            text_y,
            line_pitch,
        }
    }

    pub fn for_display<D: Display>(display: &D) -> Self {
        Self::new(display.width(), display.height(), display.font_height())
    }

    /// Apex of the horizontal arrow for `scale_x`.
    pub fn x_apex(&self, scale_x: i8) -> (i32, i32) {
        match Direction::for_x(scale_x) {
            Direction::Right => (self.center_x + self.margin_x, self.center_y),
            _ => (self.center_x - self.margin_x, self.center_y),
        }
    }

    /// Apex of the vertical arrow for `scale_y`.
    pub fn y_apex(&self, scale_y: i8) -> (i32, i32) {
        match Direction::for_y(scale_y) {
            Direction::Up => (self.center_x, self.center_y - self.margin_y),
            _ => (self.center_x, self.center_y + self.margin_y),
        }
    }
}

/// Draws whole frames for a [`DisplayMode`].
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    layout: Layout,
}

impl Renderer {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn for_display<D: Display>(display: &D) -> Self {
        Self::new(Layout::for_display(display))
    }

    /// Clear, draw the frame for `mode`, and present it.
    pub fn render<D: Display>(
        &self,
        display: &mut D,
        mode: DisplayMode,
        accel: &Vector3,
        sample: &OrientationSample,
    ) -> Result<(), Error> {
        display.clear();
        match mode {
            DisplayMode::Off => {}
            DisplayMode::TwoAxis => {
                self.draw_x_arrow(display, sample.scale_x);
                self.draw_y_arrow(display, sample.scale_y);
            }
            DisplayMode::XAxisOnly => self.draw_x_arrow(display, sample.scale_x),
            DisplayMode::YAxisOnly => self.draw_y_arrow(display, sample.scale_y),
            DisplayMode::RawData => self.draw_raw(display, accel),
        }
        display.present()
    }

    /// Boot self-test: light every pixel, show it, then clear the buffer.
    pub fn splash<D: Display>(&self, display: &mut D) -> Result<(), Error> {
        for x in 0..display.width() as i32 {
            for y in 0..display.height() as i32 {
                display.draw_pixel(x, y);
            }
        }
        display.present()?;
        display.clear();
        Ok(())
    }

    fn draw_x_arrow<D: Display>(&self, display: &mut D, scale_x: i8) {
        let (x, y) = self.layout.x_apex(scale_x);
        draw_triangle(display, x, y, scale_x.unsigned_abs(), Direction::for_x(scale_x));
    }

    fn draw_y_arrow<D: Display>(&self, display: &mut D, scale_y: i8) {
        let (x, y) = self.layout.y_apex(scale_y);
        draw_triangle(display, x, y, scale_y.unsigned_abs(), Direction::for_y(scale_y));
    }

    fn draw_raw<D: Display>(&self, display: &mut D, accel: &Vector3) {
        let rows = [("AX", accel.x), ("AY", accel.y), ("AZ", accel.z)];
        let first = self.layout.text_y - self.layout.line_pitch * (RAW_DATA_LINES as i32 / 2);
        for (row, (label, value)) in rows.iter().enumerate() {
            let mut line: heapless::String<16> = heapless::String::new();
            let _ = write!(line, "{}:{:.3}", label, value);
            let y = first + row as i32 * self.layout.line_pitch;
            display.draw_text(0, y, line.as_str());
        }
    }
}
