//! Host doubles shared by the integration tests

#![allow(dead_code)]

use rangelight_core::traits::{
    Brightness, Buzzer, Digits, DisplayError, IndicatorDisplay, SwitchInputs, Tone, Volume,
};
use rangelight_protocol::{Colour, Detail};

/// What the panel would show after its last flush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panel {
    pub colour: Option<Colour>,
    pub detail: Detail,
    pub digits: Digits,
    pub brightness: Option<Brightness>,
}

/// Panel that tracks staged and shown contents separately
#[derive(Debug, Default)]
pub struct PanelDisplay {
    pub staged: Panel,
    pub shown: Panel,
    pub flushes: usize,
    /// Every digits value staged, in order
    pub digit_log: Vec<Digits>,
}

impl IndicatorDisplay for PanelDisplay {
    fn set_indicator(&mut self, colour: Colour) {
        if colour != Colour::Reserved {
            self.staged.colour = Some(colour);
        }
    }

    fn set_detail(&mut self, detail: Detail) {
        if detail != Detail::Reserved {
            self.staged.detail = detail;
        }
    }

    fn set_digits(&mut self, digits: Digits) {
        self.staged.digits = digits;
        self.digit_log.push(digits);
    }

    fn set_brightness(&mut self, brightness: Brightness) {
        self.staged.brightness = Some(brightness);
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.shown = self.staged;
        self.flushes += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ToneLog {
    pub tones: Vec<Tone>,
}

impl ToneLog {
    /// Number of silent-to-audible edges
    pub fn pulses(&self) -> usize {
        let mut previous = Tone::Off;
        let mut count = 0;
        for &tone in &self.tones {
            if previous == Tone::Off && tone != Tone::Off {
                count += 1;
            }
            previous = tone;
        }
        count
    }
}

impl Buzzer for ToneLog {
    fn set_tone(&mut self, tone: Tone) {
        self.tones.push(tone);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Switches {
    pub brightness: Brightness,
    pub volume: Volume,
    pub matchplay: Detail,
}

impl Default for Switches {
    fn default() -> Self {
        Self {
            brightness: Brightness::Low,
            volume: Volume::Loud,
            matchplay: Detail::AB,
        }
    }
}

impl SwitchInputs for Switches {
    fn brightness(&mut self) -> Brightness {
        self.brightness
    }

    fn volume(&mut self) -> Volume {
        self.volume
    }

    fn matchplay_mode(&mut self) -> Detail {
        self.matchplay
    }
}

pub mod bits {
    pub const TIME: u32 = 1;
    pub const AMBER: u32 = 1 << 1;
    pub const GREEN: u32 = 2 << 1;
    pub const AB: u32 = 1 << 3;
    pub const CD: u32 = 2 << 3;
    pub const COUNTDOWN: u32 = 1 << 5;
    pub const MATCHPLAY: u32 = 1 << 6;
    pub const ESTOP: u32 = 1 << 7;
    pub const CONTINUES: u32 = 1 << 9;
}
