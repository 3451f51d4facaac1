//! Frame-buffered indicator panel
//!
//! The panel is one long chain of addressable LEDs: three traffic light
//! grids, two detail letters and three seven-segment digits. Pushing the
//! chain is slow, so the setters only edit a [`PanelFrame`] and
//! [`flush`](IndicatorDisplay::flush) hands it to a [`PanelSink`] when it
//! differs from what is already lit.

use rangelight_core::config::BrightnessLevels;
use rangelight_core::traits::{Brightness, Digits, DisplayError, IndicatorDisplay};
use rangelight_protocol::{Colour, Detail};

/// Everything the panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelFrame {
    /// Lit traffic light grid; `None` until the first colour is set
    pub light: Option<Colour>,
    pub detail: Detail,
    pub digits: Digits,
    /// Global LED scale (0-255)
    pub level: u8,
}

impl PanelFrame {
    /// Digits as drawn: leading zeros are left dark, the ones digit is
    /// always lit
    pub fn glyphs(&self) -> [Option<u8>; 3] {
        match self.digits.decimal() {
            None => [None; 3],
            Some([hundreds, tens, ones]) => {
                let show_hundreds = hundreds != 0;
                let show_tens = show_hundreds || tens != 0;
                [
                    show_hundreds.then_some(hundreds),
                    show_tens.then_some(tens),
                    Some(ones),
                ]
            }
        }
    }
}

/// Something that can put a frame on the LEDs
pub trait PanelSink {
    type Error;

    fn show(&mut self, frame: &PanelFrame) -> Result<(), Self::Error>;
}

/// [`IndicatorDisplay`] over a [`PanelSink`]
pub struct FrameBufferDisplay<S> {
    sink: S,
    levels: BrightnessLevels,
    staged: PanelFrame,
    /// Last frame the sink accepted
    shown: Option<PanelFrame>,
}

impl<S: PanelSink> FrameBufferDisplay<S> {
    pub fn new(sink: S, levels: BrightnessLevels) -> Self {
        Self {
            sink,
            levels,
            staged: PanelFrame {
                level: levels.low,
                ..PanelFrame::default()
            },
            shown: None,
        }
    }

    /// Frame that the next flush will show
    pub fn staged(&self) -> &PanelFrame {
        &self.staged
    }

    /// Frame currently on the LEDs
    pub fn shown(&self) -> Option<&PanelFrame> {
        self.shown.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: PanelSink> IndicatorDisplay for FrameBufferDisplay<S> {
    fn set_indicator(&mut self, colour: Colour) {
        if colour != Colour::Reserved {
            self.staged.light = Some(colour);
        }
    }

    fn set_detail(&mut self, detail: Detail) {
        if detail != Detail::Reserved {
            self.staged.detail = detail;
        }
    }

    fn set_digits(&mut self, digits: Digits) {
        self.staged.digits = digits;
    }

    fn set_brightness(&mut self, brightness: Brightness) {
        self.staged.level = self.levels.level(brightness);
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.shown == Some(self.staged) {
            return Ok(());
        }

        self.sink
            .show(&self.staged)
            .map_err(|_| DisplayError::Communication)?;
        self.shown = Some(self.staged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Sink that records every frame it is asked to show
    #[derive(Default)]
    struct MockSink {
        frames: Vec<PanelFrame, 8>,
        fail: bool,
    }

    impl PanelSink for MockSink {
        type Error = ();

        fn show(&mut self, frame: &PanelFrame) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.frames.push(*frame).map_err(|_| ())
        }
    }

    fn display() -> FrameBufferDisplay<MockSink> {
        FrameBufferDisplay::new(MockSink::default(), BrightnessLevels::default())
    }

    #[test]
    fn test_setters_only_stage() {
        let mut display = display();
        display.set_indicator(Colour::Green);
        display.set_digits(Digits::Value(12));
        assert!(display.sink().frames.is_empty());
        assert!(display.shown().is_none());

        display.flush().unwrap();
        let frame = display.sink().frames[0];
        assert_eq!(frame.light, Some(Colour::Green));
        assert_eq!(frame.digits, Digits::Value(12));
    }

    #[test]
    fn test_unchanged_frame_not_pushed() {
        let mut display = display();
        display.set_indicator(Colour::Red);
        display.flush().unwrap();
        display.set_indicator(Colour::Red);
        display.flush().unwrap();
        assert_eq!(display.sink().frames.len(), 1);
    }

    #[test]
    fn test_reserved_values_leave_panel_alone() {
        let mut display = display();
        display.set_indicator(Colour::Amber);
        display.set_detail(Detail::CD);
        display.set_indicator(Colour::Reserved);
        display.set_detail(Detail::Reserved);
        assert_eq!(display.staged().light, Some(Colour::Amber));
        assert_eq!(display.staged().detail, Detail::CD);
    }

    #[test]
    fn test_brightness_levels() {
        let mut display = display();
        assert_eq!(display.staged().level, 64);
        display.set_brightness(Brightness::High);
        assert_eq!(display.staged().level, 192);
    }

    #[test]
    fn test_failed_push_is_retried() {
        let mut display = display();
        display.set_digits(Digits::Value(5));
        display.sink_mut().fail = true;
        assert_eq!(display.flush(), Err(DisplayError::Communication));
        assert!(display.shown().is_none());

        display.sink_mut().fail = false;
        display.flush().unwrap();
        assert_eq!(display.sink().frames.len(), 1);
    }

    #[test]
    fn test_leading_zeros_dark() {
        let frame = |digits| PanelFrame {
            digits,
            ..PanelFrame::default()
        };
        assert_eq!(frame(Digits::Value(42)).glyphs(), [None, Some(4), Some(2)]);
        assert_eq!(frame(Digits::Value(0)).glyphs(), [None, None, Some(0)]);
        assert_eq!(frame(Digits::Value(305)).glyphs(), [Some(3), Some(0), Some(5)]);
        assert_eq!(frame(Digits::Blank).glyphs(), [None; 3]);
    }
}
