//! Display and countdown state machine
//!
//! Display modes:
//!
//! - **Blank**: red light only, no letters, no digits
//! - **Idle**: red light, detail letters, the stored time
//! - **Counting**: as the last command drew it, digits decrementing once per
//!   tick interval
//!
//! The buzzer runs alongside as an independent pulse train. When a train
//! ends and no countdown is running the light drops to Idle.

use rangelight_protocol::{Colour, Command, Detail};

use super::buzzer::{BuzzerSchedule, BuzzerStep};
use super::events::{CommandOutcome, CountdownTick, TickReport};
use crate::config::LightConfig;
use crate::traits::{Buzzer, Digits, IndicatorDisplay, Tone, Volume};

/// Which of the three display modes the light is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    #[default]
    Blank,
    Idle,
    Counting,
}

/// The last accepted command, as the light remembers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    pub countdown_continues: bool,
    pub last_end: bool,
    pub countdown: bool,
    pub detail: Detail,
    pub colour: Colour,
    pub time_enabled: bool,
    /// Seconds, never negative
    pub time: i32,
    pub start_beeps: i32,
    pub end_beeps: i32,
}

impl From<&Command> for DeviceState {
    fn from(cmd: &Command) -> Self {
        Self {
            countdown_continues: cmd.countdown_continues,
            last_end: cmd.last_end,
            countdown: cmd.countdown,
            detail: cmd.detail,
            colour: cmd.colour,
            time_enabled: cmd.time_enabled,
            time: cmd.time.max(0),
            start_beeps: cmd.start_beeps,
            end_beeps: cmd.end_beeps,
        }
    }
}

/// The light's behaviour, driven by commands and ticks
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceStateMachine {
    config: LightConfig,
    state: DeviceState,
    mode: DisplayMode,
    matchplay_mode: Detail,
    buzzer: BuzzerSchedule,
    /// Last tone handed to the buzzer driver
    tone: Tone,
    /// Time of the last countdown step (or of the countdown start)
    tick_anchor_ms: u64,
    dirty: bool,
}

impl DeviceStateMachine {
    pub fn new(config: LightConfig) -> Self {
        Self {
            config,
            state: DeviceState::default(),
            mode: DisplayMode::Blank,
            matchplay_mode: Detail::AB,
            buzzer: BuzzerSchedule::new(),
            tone: Tone::Off,
            tick_anchor_ms: 0,
            dirty: false,
        }
    }

    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn matchplay_mode(&self) -> Detail {
        self.matchplay_mode
    }

    pub fn buzzer(&self) -> &BuzzerSchedule {
        &self.buzzer
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Display intents are pending a flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Record the matchplay switch; returns `true` when it changed
    pub fn set_matchplay_mode(&mut self, mode: Detail) -> bool {
        let changed = self.matchplay_mode != mode;
        self.matchplay_mode = mode;
        changed
    }

    /// Red light only; the stored colour becomes red
    pub fn enter_blank<D: IndicatorDisplay>(&mut self, display: &mut D) {
        display.set_detail(Detail::None);
        display.set_digits(Digits::Blank);
        self.state.colour = Colour::Red;
        display.set_indicator(Colour::Red);
        self.mode = DisplayMode::Blank;
        self.dirty = true;
    }

    /// Red light plus the stored detail and time
    pub fn enter_idle<D: IndicatorDisplay>(&mut self, display: &mut D) {
        self.state.colour = Colour::Red;
        display.set_indicator(Colour::Red);
        display.set_digits(Digits::from_seconds(self.state.time));
        display.set_detail(self.state.detail);
        self.mode = DisplayMode::Idle;
        self.dirty = true;
    }

    /// Apply a decoded command
    pub fn apply<D, B>(
        &mut self,
        cmd: &Command,
        now_ms: u64,
        volume: Volume,
        display: &mut D,
        buzzer: &mut B,
    ) -> CommandOutcome
    where
        D: IndicatorDisplay,
        B: Buzzer,
    {
        if cmd.matchplay && cmd.detail != self.matchplay_mode {
            return CommandOutcome::IgnoredMatchplay {
                detail: cmd.detail,
                mode: self.matchplay_mode,
            };
        }

        let old = self.state;
        let mut next = DeviceState::from(cmd);

        // The controller drops the flag as soon as its own countdown ends,
        // which can be before ours does. Hold it until a countdown end uses it.
        if old.countdown_continues && !next.countdown_continues {
            next.countdown_continues = true;
        }
        self.state = next;

        if cmd.emergency_stop {
            self.state.countdown = false;
            self.buzzer.cancel();
            self.sound(i32::from(self.config.emergency_beeps), now_ms, volume, buzzer);
            self.enter_blank(display);
            return CommandOutcome::EmergencyStop;
        }

        let time_changed = next.time != old.time || !old.time_enabled;
        if next.time_enabled && time_changed {
            display.set_digits(Digits::from_seconds(next.time));
            self.dirty = true;
        }
        if old.time_enabled && !next.time_enabled {
            display.set_digits(Digits::Blank);
            self.dirty = true;
        }
        if old.colour != next.colour {
            display.set_indicator(next.colour);
            self.dirty = true;
        }
        if old.detail != next.detail {
            display.set_detail(next.detail);
            self.dirty = true;
        }

        match (old.countdown, next.countdown) {
            (false, true) => {
                self.tick_anchor_ms = now_ms;
                self.state.time = (self.state.time - 1).max(0);
                self.sound(next.start_beeps, now_ms, volume, buzzer);
                display.set_digits(Digits::from_seconds(self.state.time));
                self.mode = DisplayMode::Counting;
                self.dirty = true;
                CommandOutcome::CountdownStarted {
                    time: self.state.time,
                }
            }
            (true, false) => {
                self.sound(next.end_beeps, now_ms, volume, buzzer);
                self.enter_blank(display);
                CommandOutcome::CountdownStopped
            }
            _ => CommandOutcome::Applied,
        }
    }

    /// Advance the countdown and the buzzer to `now_ms`
    ///
    /// At most one countdown step per call; a late call does not catch up.
    pub fn tick<D, B>(
        &mut self,
        now_ms: u64,
        volume: Volume,
        display: &mut D,
        buzzer: &mut B,
    ) -> TickReport
    where
        D: IndicatorDisplay,
        B: Buzzer,
    {
        let mut report = TickReport::default();

        let elapsed = now_ms.saturating_sub(self.tick_anchor_ms);
        if self.state.countdown && elapsed >= u64::from(self.config.countdown_tick_ms) {
            report.countdown = Some(self.countdown_step(now_ms, volume, display, buzzer));
        }

        match self.buzzer.update(now_ms, self.config.buzzer_pulse_ms, volume) {
            BuzzerStep::Silent => {}
            BuzzerStep::Tone(tone) => self.drive(tone, buzzer),
            BuzzerStep::Finished => {
                self.drive(Tone::Off, buzzer);
                report.buzzer_finished = true;
                if !self.state.countdown {
                    self.enter_idle(display);
                }
            }
        }

        report
    }

    fn countdown_step<D, B>(
        &mut self,
        now_ms: u64,
        volume: Volume,
        display: &mut D,
        buzzer: &mut B,
    ) -> CountdownTick
    where
        D: IndicatorDisplay,
        B: Buzzer,
    {
        if self.state.time > 1 {
            self.state.time -= 1;
            display.set_digits(Digits::from_seconds(self.state.time));
            self.dirty = true;
            self.tick_anchor_ms = now_ms;
            return CountdownTick::Step {
                time: self.state.time,
            };
        }

        self.sound(self.state.end_beeps, now_ms, volume, buzzer);
        if !self.state.countdown_continues {
            self.state.countdown = false;
            self.enter_blank(display);
            return CountdownTick::Ended;
        }

        // Flag consumed; the anchor is left alone so the next pass lands here
        // again unless a fresh command restarts the countdown first
        self.state.countdown_continues = false;
        CountdownTick::Continued
    }

    fn sound<B: Buzzer>(&mut self, pulses: i32, now_ms: u64, volume: Volume, buzzer: &mut B) {
        let pulse_ms = self.config.buzzer_pulse_ms;
        if let Some(tone) = self.buzzer.start(pulses, now_ms, pulse_ms, volume) {
            self.drive(tone, buzzer);
        }
    }

    fn drive<B: Buzzer>(&mut self, tone: Tone, buzzer: &mut B) {
        if tone != self.tone {
            buzzer.set_tone(tone);
            self.tone = tone;
        }
    }
}
