//! Recording doubles for the driver traits

use heapless::Vec;
use rangelight_protocol::{Colour, Detail};

use crate::traits::{
    Brightness, Buzzer, Digits, DisplayError, IndicatorDisplay, SwitchInputs, Tone, Volume,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Indicator(Colour),
    Detail(Detail),
    Digits(Digits),
    Brightness(Brightness),
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub intents: Vec<Intent, 128>,
    pub flushes: u32,
    pub fail_flush: bool,
}

impl RecordingDisplay {
    pub fn saw(&self, intent: Intent) -> bool {
        self.intents.contains(&intent)
    }

    pub fn last_digits(&self) -> Option<Digits> {
        self.intents.iter().rev().find_map(|intent| match intent {
            Intent::Digits(digits) => Some(*digits),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }

    fn record(&mut self, intent: Intent) {
        let _ = self.intents.push(intent);
    }
}

impl IndicatorDisplay for RecordingDisplay {
    fn set_indicator(&mut self, colour: Colour) {
        self.record(Intent::Indicator(colour));
    }

    fn set_detail(&mut self, detail: Detail) {
        self.record(Intent::Detail(detail));
    }

    fn set_digits(&mut self, digits: Digits) {
        self.record(Intent::Digits(digits));
    }

    fn set_brightness(&mut self, brightness: Brightness) {
        self.record(Intent::Brightness(brightness));
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.fail_flush {
            return Err(DisplayError::Communication);
        }
        self.flushes += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingBuzzer {
    pub tones: Vec<Tone, 64>,
}

impl RecordingBuzzer {
    pub fn last(&self) -> Option<Tone> {
        self.tones.last().copied()
    }
}

impl Buzzer for RecordingBuzzer {
    fn set_tone(&mut self, tone: Tone) {
        let _ = self.tones.push(tone);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedSwitches {
    pub brightness: Brightness,
    pub volume: Volume,
    pub matchplay: Detail,
}

impl Default for FixedSwitches {
    fn default() -> Self {
        Self {
            brightness: Brightness::High,
            volume: Volume::Loud,
            matchplay: Detail::AB,
        }
    }
}

impl SwitchInputs for FixedSwitches {
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
