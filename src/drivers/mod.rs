//! Board drivers - nRF52840 peripherals behind the library's `hw` traits.
//!
//! ## Components
//!
//! - **Button**: active-low tactile switch on GPIOTE, edge task + held level
//! - **Display**: SSD1306 64×48 Micro OLED via I²C
//! - **Accelerometer**: LIS3DH via I²C (shares the bus with the display)

pub mod button;
pub mod display;
pub mod imu;
