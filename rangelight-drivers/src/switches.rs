//! Front panel switches
//!
//! All switch pins use pull-ups, so an open contact reads high. The volume
//! switch is a centre-off three-way toggle grounding one of two pins:
//!
//! | quiet pin | loud pin | volume |
//! |-----------|----------|--------|
//! | high      | high     | mute   |
//! | high      | low      | quiet  |
//! | low       | high     | loud   |
//!
//! A pin that fails to read is treated as open.

use embedded_hal::digital::InputPin;
use rangelight_core::traits::{Brightness, SwitchInputs, Volume};
use rangelight_protocol::Detail;

/// The four switch inputs of a light
pub struct SwitchPanel<B, Q, L, M> {
    brightness: B,
    quiet: Q,
    loud: L,
    matchplay: M,
    read_errors: u32,
}

impl<B, Q, L, M> SwitchPanel<B, Q, L, M>
where
    B: InputPin,
    Q: InputPin,
    L: InputPin,
    M: InputPin,
{
    pub fn new(brightness: B, quiet: Q, loud: L, matchplay: M) -> Self {
        Self {
            brightness,
            quiet,
            loud,
            matchplay,
            read_errors: 0,
        }
    }

    /// Pin reads that failed
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }
}

fn is_open<P: InputPin>(pin: &mut P, errors: &mut u32) -> bool {
    pin.is_high().unwrap_or_else(|_| {
        *errors = errors.wrapping_add(1);
        true
    })
}

impl<B, Q, L, M> SwitchInputs for SwitchPanel<B, Q, L, M>
where
    B: InputPin,
    Q: InputPin,
    L: InputPin,
    M: InputPin,
{
    fn brightness(&mut self) -> Brightness {
        if is_open(&mut self.brightness, &mut self.read_errors) {
            Brightness::High
        } else {
            Brightness::Low
        }
    }

    fn volume(&mut self) -> Volume {
        let quiet = is_open(&mut self.quiet, &mut self.read_errors);
        let loud = is_open(&mut self.loud, &mut self.read_errors);
        match (quiet, loud) {
            (true, true) => Volume::Mute,
            (true, false) => Volume::Quiet,
            _ => Volume::Loud,
        }
    }

    fn matchplay_mode(&mut self) -> Detail {
        if is_open(&mut self.matchplay, &mut self.read_errors) {
            Detail::CD
        } else {
            Detail::AB
        }
    }
}
