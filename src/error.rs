//! Device failures the indicator can hit.
//!
//! Fieldless and `Copy`, so errors cross the `no_std` boundary without
//! allocation and log through `defmt` when that feature is on.

/// Everything a bring-up step or a cycle can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Accelerometer
    /// The accelerometer did not answer or reported the wrong identity.
    SensorUnavailable,

    // Display
    /// The display controller did not accept its init sequence.
    DisplayUnavailable,

    /// Flushing a frame to the display failed.
    Display,

    // Bus
    /// An I²C transaction failed after the device was brought up.
    Bus,
}

impl Error {
    /// Short human-readable label for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Error::SensorUnavailable => "accelerometer not connected, check wiring and I2C address",
            Error::DisplayUnavailable => "display begin failed",
            Error::Display => "display flush failed",
            Error::Bus => "I2C transaction failed",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
