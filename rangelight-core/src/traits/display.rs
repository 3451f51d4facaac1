//! Indicator panel trait

use rangelight_protocol::{Colour, Detail};

/// Largest value the three-digit display can show
pub const MAX_DIGITS: u16 = 999;

/// Errors that can occur when pushing a frame to the LED panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Write to the LED chain failed
    Communication,
    /// Panel not initialized yet
    NotReady,
}

/// Contents of the numeric display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Digits {
    /// All segments off
    #[default]
    Blank,
    /// A value between 0 and 999
    Value(u16),
}

impl Digits {
    /// Digits for a time in seconds, clamped into `0..=999`
    pub fn from_seconds(seconds: i32) -> Self {
        Digits::Value(seconds.clamp(0, MAX_DIGITS as i32) as u16)
    }

    /// Decimal digits, most significant first (`None` when blank)
    pub fn decimal(&self) -> Option<[u8; 3]> {
        match *self {
            Digits::Blank => None,
            Digits::Value(v) => {
                let v = v.min(MAX_DIGITS);
                Some([(v / 100) as u8, (v / 10 % 10) as u8, (v % 10) as u8])
            }
        }
    }
}

/// Position of the brightness switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Brightness {
    Low,
    High,
}

/// LED panel driver
///
/// The setters only record what should be shown. Nothing reaches the LEDs
/// until [`flush`](Self::flush), which the control loop calls at most once
/// per pass and never while a frame is half received: pushing the LED chain
/// blocks interrupts long enough to overrun the serial FIFO.
pub trait IndicatorDisplay {
    /// Light one traffic light colour and clear the other two
    ///
    /// `Colour::Reserved` leaves the lights as they are.
    fn set_indicator(&mut self, colour: Colour);

    /// Show a detail letter pair, or clear both letters for `Detail::None`
    ///
    /// `Detail::Reserved` leaves the letters as they are.
    fn set_detail(&mut self, detail: Detail);

    /// Show a number or blank the numeric display
    fn set_digits(&mut self, digits: Digits);

    /// Apply a global brightness level
    fn set_brightness(&mut self, brightness: Brightness);

    /// Push pending changes to the LEDs
    fn flush(&mut self) -> Result<(), DisplayError>;
}
