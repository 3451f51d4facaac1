//! Light configuration
//!
//! Values come from `light.toml`, validated and turned into constants by the
//! build script.

use rangelight_core::config::{BrightnessLevels, LightConfig, VolumeLevels};
use rangelight_hal::UartConfig;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/light_config.rs"));
}

pub use generated::*;

pub fn light_config() -> LightConfig {
    LightConfig {
        buzzer_pulse_ms: BUZZER_PULSE_MS,
        countdown_tick_ms: COUNTDOWN_TICK_MS,
        emergency_beeps: EMERGENCY_BEEPS,
        rx_buffer_capacity: RX_BUFFER_CAPACITY,
    }
}

pub fn brightness_levels() -> BrightnessLevels {
    BrightnessLevels {
        low: BRIGHTNESS_LOW,
        high: BRIGHTNESS_HIGH,
    }
}

pub fn volume_levels() -> VolumeLevels {
    VolumeLevels {
        quiet: VOLUME_QUIET,
        loud: VOLUME_LOUD,
    }
}

/// Serial settings for the radio link
pub fn uart_config() -> UartConfig {
    UartConfig {
        baudrate: UART_BAUDRATE,
        ..UartConfig::default()
    }
}
