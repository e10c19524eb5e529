//! LIS3DH accelerometer driver.
//!
//! Register-level over any `embedded_hal::i2c::I2c`, so it can share
//! the bus with the display through `embedded-hal-bus`.  Configured for
//! 100 Hz, ±2 g, high-resolution (12-bit, 1 mg/digit).

use tilt_indicator::hw::Accelerometer;
use tilt_indicator::orientation::Vector3;
use tilt_indicator::Error;

// LIS3DH register addresses
const REG_WHO_AM_I: u8 = 0x0F;
const REG_CTRL_REG1: u8 = 0x20;
const REG_CTRL_REG4: u8 = 0x23;
const REG_STATUS: u8 = 0x27;
const REG_OUT_X_L: u8 = 0x28; // Start of 6-byte XYZ burst
const AUTO_INCREMENT: u8 = 0x80;
const WHO_AM_I_EXPECTED: u8 = 0x33;

/// ODR 100 Hz, normal power, X/Y/Z enabled.
const CTRL_REG1_100HZ_XYZ: u8 = 0x57;
/// Block data update, ±2 g, high-resolution.
const CTRL_REG4_BDU_2G_HR: u8 = 0x88;
/// New X, Y and Z data available.
const STATUS_ZYXDA: u8 = 0x08;

/// g per digit of the left-justified 12-bit output at ±2 g.
const G_PER_DIGIT: f32 = 0.001;

pub struct Lis3dh<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Lis3dh<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Verify the device identity and configure it.  Safe to retry.
    pub fn begin(&mut self) -> Result<(), Error> {
        let id = self
            .read_register(REG_WHO_AM_I)
            .map_err(|_| Error::SensorUnavailable)?;
        if id != WHO_AM_I_EXPECTED {
            return Err(Error::SensorUnavailable);
        }

        self.write_register(REG_CTRL_REG1, CTRL_REG1_100HZ_XYZ)
            .map_err(|_| Error::SensorUnavailable)?;
        self.write_register(REG_CTRL_REG4, CTRL_REG4_BDU_2G_HR)
            .map_err(|_| Error::SensorUnavailable)?;

        defmt::info!("LIS3DH initialised (100 Hz, ±2 g, high-resolution)");
        Ok(())
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, Error> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| Error::Bus)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| Error::Bus)
    }
}

impl<I2C> Accelerometer for Lis3dh<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Blocks until the next 100 Hz sample (at most ~10 ms).
    fn read_vector(&mut self) -> Result<Vector3, Error> {
        while self.read_register(REG_STATUS)? & STATUS_ZYXDA == 0 {}

        let mut raw = [0u8; 6];
        self.i2c
            .write_read(self.address, &[REG_OUT_X_L | AUTO_INCREMENT], &mut raw)
            .map_err(|_| Error::Bus)?;

        Ok(Vector3 {
            x: axis(raw[0], raw[1]),
            y: axis(raw[2], raw[3]),
            z: axis(raw[4], raw[5]),
        })
    }
}

/// Little-endian, left-justified 12-bit sample to g.
fn axis(lo: u8, hi: u8) -> f32 {
    (i16::from_le_bytes([lo, hi]) >> 4) as f32 * G_PER_DIGIT
}
