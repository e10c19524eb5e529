//! Hardware seams - what the control loop needs from the board.
//!
//! The firmware binary implements these over the real peripherals
//! (`src/drivers/`); host tests implement them with mocks.

use crate::error::Error;
use crate::orientation::Vector3;

/// 3-axis accelerometer sampled on demand.
pub trait Accelerometer {
    /// Read one acceleration vector in g, blocking until the device has a
    /// fresh sample.
    fn read_vector(&mut self) -> Result<Vector3, Error>;
}

/// Monochrome pixel display with a fixed-size text font.
///
/// Drawing goes to a frame buffer; nothing is visible until
/// [`Display::present`]. Coordinates outside the panel are ignored.
pub trait Display {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Height of one text line in pixels.
    fn font_height(&self) -> u32;

    fn clear(&mut self);
    fn draw_pixel(&mut self, x: i32, y: i32);
    /// Draw `text` with its top-left corner at (`x`, `y`).
    fn draw_text(&mut self, x: i32, y: i32, text: &str);
    /// Push the frame buffer to the panel.
    fn present(&mut self) -> Result<(), Error>;
}

/// Synchronously readable button line.
pub trait ButtonLine {
    /// `true` while the button is physically held down.
    fn is_pressed(&mut self) -> bool;

    /// When the line last went back up, if the line keeps track.
    fn released_at_ms(&mut self) -> Option<u32>;
}

/// Monotonic millisecond clock. Wraps; callers use wrapping arithmetic.
pub trait Clock {
    fn now_ms(&self) -> u32;
}
