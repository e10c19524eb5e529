//! SSD1306 OLED display wrapper.
//!
//! The panel is the 64×48 Micro OLED; all drawing goes to the driver's
//! frame buffer and reaches the glass on `present`.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;
use tilt_indicator::config::I2C_ADDR_OLED;
use tilt_indicator::hw::Display;
use tilt_indicator::Error;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral (or a shared-bus device).
pub type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize64x48, BufferedGraphicsMode<DisplaySize64x48>>;

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_5X8)
        .text_color(BinaryColor::On)
        .build()
}

/// Shown in boot diagnostics.
pub const NAME: &str = "Micro OLED";

pub struct MicroOled<I2C> {
    driver: Driver<I2C>,
}

impl<I2C> MicroOled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Wrap the bus; nothing is sent until [`MicroOled::begin`].
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, I2C_ADDR_OLED);
        let driver = Ssd1306::new(interface, DisplaySize64x48, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self { driver }
    }

    /// Send the init sequence and blank the panel.  Safe to retry.
    pub fn begin(&mut self) -> Result<(), Error> {
        self.driver.init().map_err(|_| Error::DisplayUnavailable)?;
        self.driver.clear_buffer();
        self.driver.flush().map_err(|_| Error::DisplayUnavailable)
    }
}

impl<I2C> Display for MicroOled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn width(&self) -> u32 {
        self.driver.size().width
    }

    fn height(&self) -> u32 {
        self.driver.size().height
    }

    fn font_height(&self) -> u32 {
        FONT_5X8.character_size.height
    }

    fn clear(&mut self) {
        self.driver.clear_buffer();
    }

    fn draw_pixel(&mut self, x: i32, y: i32) {
        // The buffer clips off-panel pixels; drawing cannot fail.
        let _ = Pixel(Point::new(x, y), BinaryColor::On).draw(&mut self.driver);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let _ = Text::with_baseline(text, Point::new(x, y), text_style(), Baseline::Top)
            .draw(&mut self.driver);
    }

    fn present(&mut self) -> Result<(), Error> {
        self.driver.flush().map_err(|_| Error::Display)
    }
}
