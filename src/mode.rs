//! Display mode state machine.
//!
//! ```text
//!            Double         Double           Double           Double
//!   Off ──────────▶ TwoAxis ──────▶ XAxisOnly ──────▶ YAxisOnly ──────▶ RawData
//!    ▲                 ▲                                                   │
//!    │ Long (any)      └─────────────────────── Double ────────────────────┘
//! ```
//!
//! `Off` is the home state: only a long press reaches it, and double
//! presses never cycle back into it.

use crate::gesture::Press;

/// What the display shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Blank frame.
    #[default]
    Off,
    /// Arrows for both axes.
    TwoAxis,
    /// Left/right arrow only.
    XAxisOnly,
    /// Up/down arrow only.
    YAxisOnly,
    /// Raw accelerometer components as text.
    RawData,
}

impl DisplayMode {
    /// Transition table: the mode after `press` is consumed in `self`.
    pub const fn on_press(self, press: Press) -> Self {
        match (self, press) {
            (_, Press::Long) => DisplayMode::Off,

            (DisplayMode::Off, Press::Double) => DisplayMode::TwoAxis,
            (DisplayMode::TwoAxis, Press::Double) => DisplayMode::XAxisOnly,
            (DisplayMode::XAxisOnly, Press::Double) => DisplayMode::YAxisOnly,
            (DisplayMode::YAxisOnly, Press::Double) => DisplayMode::RawData,
            (DisplayMode::RawData, Press::Double) => DisplayMode::TwoAxis,

            (mode, Press::None | Press::Single) => mode,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Off => "off",
            DisplayMode::TwoAxis => "two-axis",
            DisplayMode::XAxisOnly => "x-axis",
            DisplayMode::YAxisOnly => "y-axis",
            DisplayMode::RawData => "raw",
        }
    }
}

/// Holds the current mode; the only writer of it.
#[derive(Debug, Default)]
pub struct ModeStateMachine {
    mode: DisplayMode,
}

impl ModeStateMachine {
    /// Start in [`DisplayMode::Off`].
    pub const fn new() -> Self {
        Self {
            mode: DisplayMode::Off,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Consume one classified press and return the resulting mode.
    pub fn apply(&mut self, press: Press) -> DisplayMode {
        self.mode = self.mode.on_press(press);
        self.mode
    }
}
