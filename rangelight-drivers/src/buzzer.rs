//! PWM buzzer
//!
//! The buzzer is a passive transducer on a PWM output. Volume is the duty
//! cycle: the quiet and loud levels come from [`VolumeLevels`], off is 0%.

use embedded_hal::pwm::SetDutyCycle;
use rangelight_core::config::VolumeLevels;
use rangelight_core::traits::{Buzzer, Tone};

/// Buzzer on a PWM channel
pub struct PwmBuzzer<P> {
    pwm: P,
    levels: VolumeLevels,
    tone: Tone,
    /// Failed duty updates
    errors: u32,
}

impl<P: SetDutyCycle> PwmBuzzer<P> {
    /// Create the buzzer and silence the output
    pub fn new(pwm: P, levels: VolumeLevels) -> Self {
        let mut buzzer = Self {
            pwm,
            levels,
            tone: Tone::Off,
            errors: 0,
        };
        buzzer.write(Tone::Off);
        buzzer
    }

    /// Tone currently driven
    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Number of duty updates the PWM rejected
    pub fn errors(&self) -> u32 {
        self.errors
    }

    fn write(&mut self, tone: Tone) {
        let duty = u16::from(self.levels.duty(tone));
        match self.pwm.set_duty_cycle_fraction(duty, u16::from(u8::MAX)) {
            Ok(()) => self.tone = tone,
            Err(_) => self.errors = self.errors.wrapping_add(1),
        }
    }
}

impl<P: SetDutyCycle> Buzzer for PwmBuzzer<P> {
    fn set_tone(&mut self, tone: Tone) {
        if tone != self.tone {
            self.write(tone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::{ErrorKind, ErrorType};

    /// Mock PWM channel with a 0..=1000 duty range
    struct MockPwm {
        duty: u16,
        writes: u32,
        fail: bool,
    }

    impl MockPwm {
        fn new() -> Self {
            Self {
                duty: 0xFFFF,
                writes: 0,
                fail: false,
            }
        }
    }

    #[derive(Debug)]
    struct MockError;

    impl embedded_hal::pwm::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for MockPwm {
        type Error = MockError;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.duty = duty;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_starts_silent() {
        let buzzer = PwmBuzzer::new(MockPwm::new(), VolumeLevels::default());
        assert_eq!(buzzer.pwm.duty, 0);
        assert_eq!(buzzer.tone(), Tone::Off);
    }

    #[test]
    fn test_volume_levels_scale_to_duty() {
        let mut buzzer = PwmBuzzer::new(MockPwm::new(), VolumeLevels::default());

        buzzer.set_tone(Tone::Loud);
        assert_eq!(buzzer.pwm.duty, (254u32 * 1000 / 255) as u16);

        buzzer.set_tone(Tone::Quiet);
        assert_eq!(buzzer.pwm.duty, (64u32 * 1000 / 255) as u16);

        buzzer.set_tone(Tone::Off);
        assert_eq!(buzzer.pwm.duty, 0);
    }

    #[test]
    fn test_repeated_tone_not_rewritten() {
        let mut buzzer = PwmBuzzer::new(MockPwm::new(), VolumeLevels::default());
        buzzer.set_tone(Tone::Loud);
        buzzer.set_tone(Tone::Loud);
        assert_eq!(buzzer.pwm.writes, 2);
    }

    #[test]
    fn test_failed_write_retried() {
        let mut buzzer = PwmBuzzer::new(MockPwm::new(), VolumeLevels::default());
        buzzer.pwm.fail = true;
        buzzer.set_tone(Tone::Loud);
        assert_eq!(buzzer.errors(), 1);
        assert_eq!(buzzer.tone(), Tone::Off);

        buzzer.pwm.fail = false;
        buzzer.set_tone(Tone::Loud);
        assert_eq!(buzzer.tone(), Tone::Loud);
    }

    #[test]
    fn test_buzzer_trait() {
        fn sound<B: Buzzer>(b: &mut B) {
            b.set_tone(Tone::Quiet);
        }

        let mut buzzer = PwmBuzzer::new(MockPwm::new(), VolumeLevels::default());
        sound(&mut buzzer);
        assert_eq!(buzzer.tone(), Tone::Quiet);
    }
}
