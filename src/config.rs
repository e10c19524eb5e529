//! Compile-time tuning for the indicator.
//!
//! Gesture timing, cycle cadence, tilt scale, reference geometry and
//! bus addresses.

// Gesture timing

/// Edges closer together than this are contact bounce (ms).
pub const BUTTON_DEBOUNCE_MS: u32 = 50;

/// Hold duration that turns a press into a long press (ms).
pub const LONG_PRESS_MS: u32 = 3000;

/// Window after the first release in which a second press counts as a
/// double press (ms).
pub const DOUBLE_PRESS_WINDOW_MS: u32 = 500;

// Main cycle

/// Delay between two main cycles (ms). Tilt responsiveness is one cycle.
pub const CYCLE_PERIOD_MS: u64 = 250;

/// Delay between two failed device bring-up attempts (ms).
pub const BRING_UP_RETRY_MS: u32 = 500;

// Orientation scale

/// Tilt angle at which the indicator saturates (degrees).
pub const MAX_TILT_DEG: f32 = 90.0;

/// Largest indicator leg length, reached at `MAX_TILT_DEG` (pixels).
pub const MAX_SCALE: i8 = 12;

// Display geometry
//
// The arrow margin was tuned on a 64×48 Micro OLED; other resolutions
// scale it per axis.

/// Width of the display the arrow margin was tuned for.
pub const REFERENCE_WIDTH: u32 = 64;

/// Height of the display the arrow margin was tuned for.
pub const REFERENCE_HEIGHT: u32 = 48;

/// Distance from the display center to each arrow apex on the
/// reference display (pixels).
pub const REFERENCE_ARROW_MARGIN: u32 = 22;

/// Number of text lines in the raw-data view.
pub const RAW_DATA_LINES: u32 = 3;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the actual `embassy_nrf::peripherals::*`
// are picked in `main.rs`.  Adjust for your custom PCB.
//
//   Button (active-low, pull-up) → P0.11
//   I²C SDA                      → P0.26
//   I²C SCL                      → P0.27

// I²C

/// SSD1306 64×48 Micro OLED address (jumper closed: 0x3C).
pub const I2C_ADDR_OLED: u8 = 0x3D;

/// LIS3DH accelerometer address (SDO high; SDO low: 0x18).
pub const I2C_ADDR_ACCEL: u8 = 0x19;
