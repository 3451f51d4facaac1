//! Configuration type definitions

use crate::traits::{Brightness, Tone};

/// Length of one buzzer pulse (and of the gap after it)
pub const DEFAULT_BUZZER_PULSE_MS: u32 = 500;

/// Countdown decrement interval
pub const DEFAULT_COUNTDOWN_TICK_MS: u32 = 1000;

/// Pulses sounded on emergency stop
pub const DEFAULT_EMERGENCY_BEEPS: u8 = 5;

/// Receive buffer size, comfortably above the largest frame
pub const DEFAULT_RX_BUFFER_CAPACITY: u16 = 320;

/// Timing configuration for the device state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightConfig {
    /// Buzzer on time per pulse; the off gap has the same length
    pub buzzer_pulse_ms: u32,
    /// Interval between countdown decrements
    pub countdown_tick_ms: u32,
    /// Number of pulses for the emergency stop alert
    pub emergency_beeps: u8,
    /// Receive buffer capacity in bytes
    pub rx_buffer_capacity: u16,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            buzzer_pulse_ms: DEFAULT_BUZZER_PULSE_MS,
            countdown_tick_ms: DEFAULT_COUNTDOWN_TICK_MS,
            emergency_beeps: DEFAULT_EMERGENCY_BEEPS,
            rx_buffer_capacity: DEFAULT_RX_BUFFER_CAPACITY,
        }
    }
}

/// LED brightness for each position of the brightness switch (0-255)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BrightnessLevels {
    pub low: u8,
    pub high: u8,
}

impl Default for BrightnessLevels {
    fn default() -> Self {
        Self { low: 64, high: 192 }
    }
}

impl BrightnessLevels {
    /// Global LED scale for a switch position
    pub fn level(&self, brightness: Brightness) -> u8 {
        match brightness {
            Brightness::Low => self.low,
            Brightness::High => self.high,
        }
    }
}

/// Buzzer PWM duty for each audible tone, out of 255
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VolumeLevels {
    pub quiet: u8,
    pub loud: u8,
}

impl Default for VolumeLevels {
    fn default() -> Self {
        Self { quiet: 64, loud: 254 }
    }
}

impl VolumeLevels {
    /// PWM duty (out of 255) for a tone
    pub fn duty(&self, tone: Tone) -> u8 {
        match tone {
            Tone::Off => 0,
            Tone::Quiet => self.quiet,
            Tone::Loud => self.loud,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_light_defaults() {
        let config = LightConfig::default();
        assert_eq!(config.buzzer_pulse_ms, 500);
        assert_eq!(config.countdown_tick_ms, 1000);
        assert_eq!(config.emergency_beeps, 5);
        assert_eq!(config.rx_buffer_capacity, 320);
    }

    #[test]
    fn test_levels() {
        let brightness = BrightnessLevels::default();
        assert_eq!(brightness.level(Brightness::Low), 64);
        assert_eq!(brightness.level(Brightness::High), 192);

        let volume = VolumeLevels::default();
        assert_eq!(volume.duty(Tone::Off), 0);
        assert_eq!(volume.duty(Tone::Quiet), 64);
        assert_eq!(volume.duty(Tone::Loud), 254);
    }
}
