//! Buzzer trait

/// What the buzzer is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    #[default]
    Off,
    Quiet,
    Loud,
}

/// Position of the three-way volume switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Volume {
    /// Centre position
    Mute,
    Quiet,
    Loud,
}

impl Volume {
    /// Tone for the audible half of a pulse
    pub fn tone(self) -> Tone {
        match self {
            Volume::Mute => Tone::Off,
            Volume::Quiet => Tone::Quiet,
            Volume::Loud => Tone::Loud,
        }
    }
}

/// Buzzer output
///
/// Driven on every toggle of a pulse train. Implementations should treat a
/// repeated tone as a no-op.
pub trait Buzzer {
    fn set_tone(&mut self, tone: Tone);
}
