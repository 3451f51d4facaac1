//! Buzzer pulse scheduling
//!
//! A pulse train is an on/off square wave anchored at `start_ms`. Each pulse
//! is `pulse_ms` of sound followed by `pulse_ms` of silence, so `n` pulses
//! last `2 * n * pulse_ms`.

use crate::traits::{Tone, Volume};

/// What the buzzer should do on this pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerStep {
    /// No pulse train running
    Silent,
    /// Pulse train running; drive this tone
    Tone(Tone),
    /// The pulse train ended on this pass
    Finished,
}

/// Buzzer sub-state: Silent when inactive, Pulsing otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuzzerSchedule {
    active: bool,
    start_ms: u64,
    end_ms: u64,
}

impl BuzzerSchedule {
    pub const fn new() -> Self {
        Self {
            active: false,
            start_ms: 0,
            end_ms: 0,
        }
    }

    /// Whether a pulse train is running
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Time at which the running pulse train ends
    pub fn end_ms(&self) -> Option<u64> {
        self.active.then_some(self.end_ms)
    }

    /// Start a train of `pulses` pulses at `now_ms`
    ///
    /// Replaces any train already running. Returns the tone for the first
    /// half-period, or `None` when `pulses` is zero or negative and nothing
    /// was scheduled.
    pub fn start(&mut self, pulses: i32, now_ms: u64, pulse_ms: u32, volume: Volume) -> Option<Tone> {
        if pulses <= 0 {
            return None;
        }

        let period = u64::from(pulse_ms) * 2;
        self.active = true;
        self.start_ms = now_ms;
        self.end_ms = now_ms.saturating_add(period.saturating_mul(pulses as u64));
        Some(volume.tone())
    }

    /// Stop the running train without reporting it as finished
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Advance to `now_ms`
    pub fn update(&mut self, now_ms: u64, pulse_ms: u32, volume: Volume) -> BuzzerStep {
        if !self.active {
            return BuzzerStep::Silent;
        }

        if now_ms >= self.end_ms {
            self.active = false;
            return BuzzerStep::Finished;
        }

        let period = u64::from(pulse_ms) * 2;
        let elapsed = now_ms.saturating_sub(self.start_ms);
        // A zero-length pulse degenerates to a continuous tone
        let audible = period == 0 || elapsed % period < u64::from(pulse_ms);

        if audible {
            BuzzerStep::Tone(volume.tone())
        } else {
            BuzzerStep::Tone(Tone::Off)
        }
    }
}
