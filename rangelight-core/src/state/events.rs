//! What a command or a tick did to the light

use rangelight_protocol::Detail;

/// Result of applying one decoded command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// Stored and redrawn, no countdown edge
    Applied,
    /// Countdown began; `time` is the first value shown
    CountdownStarted { time: i32 },
    /// Countdown stopped by the controller
    CountdownStopped,
    /// Emergency stop: countdown cancelled, alert sounding, display blanked
    EmergencyStop,
    /// Matchplay command for the other side; nothing changed
    IgnoredMatchplay { detail: Detail, mode: Detail },
}

/// What the countdown did on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownTick {
    /// One second elapsed; `time` is now shown
    Step { time: i32 },
    /// Reached zero; end beeps sounding, display blanked
    Ended,
    /// Reached zero with a follow-on countdown pending; still counting
    Continued,
}

/// Everything a call to `tick` changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub countdown: Option<CountdownTick>,
    /// A pulse train ended on this tick
    pub buzzer_finished: bool,
}
