//! Board wiring
//!
//! | GPIO | function                       |
//! |------|--------------------------------|
//! | 0    | UART0 TX (unused)              |
//! | 1    | UART0 RX from the radio modem  |
//! | 7    | volume switch, quiet contact   |
//! | 8    | matchplay side switch          |
//! | 9    | brightness switch              |
//! | 10   | LED chain data                 |
//! | 11   | buzzer (PWM slice 5, B)        |
//! | 12   | volume switch, loud contact    |
//!
//! All switches are wired to ground with internal pull-ups.

use defmt::*;
use embassy_rp::uart::{self, DataBits, Parity, StopBits};
use rangelight_drivers::{PanelFrame, PanelSink};
use rangelight_hal::uart as link;

/// PWM counter top for the buzzer: about 30 kHz at the default clock,
/// well above hearing so the duty only sets loudness
pub const BUZZER_PWM_TOP: u16 = 4095;

/// Map the link settings onto the RP2040 UART configuration
pub fn uart_config(settings: link::UartConfig) -> uart::Config {
    let mut config = uart::Config::default();
    config.baudrate = settings.baudrate;
    config.data_bits = match settings.data_bits {
        link::DataBits::Seven => DataBits::DataBits7,
        link::DataBits::Eight => DataBits::DataBits8,
    };
    config.parity = match settings.parity {
        link::Parity::None => Parity::ParityNone,
        link::Parity::Even => Parity::ParityEven,
        link::Parity::Odd => Parity::ParityOdd,
    };
    config.stop_bits = match settings.stop_bits {
        link::StopBits::One => StopBits::STOP1,
        link::StopBits::Two => StopBits::STOP2,
    };
    config
}

/// Panel sink that reports each new frame over defmt
///
/// Stands in for the LED chain driver, which maps frames to pixels.
#[derive(Default)]
pub struct DefmtPanel {
    frames: u32,
}

impl PanelSink for DefmtPanel {
    type Error = core::convert::Infallible;

    fn show(&mut self, frame: &PanelFrame) -> Result<(), Self::Error> {
        self.frames = self.frames.wrapping_add(1);
        let [hundreds, tens, ones] = frame.glyphs();
        debug!(
            "Panel #{}: light={} detail={} digits=[{} {} {}] level={}",
            self.frames, frame.light, frame.detail, hundreds, tens, ones, frame.level
        );
        Ok(())
    }
}
