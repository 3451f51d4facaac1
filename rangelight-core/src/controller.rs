//! Control loop body
//!
//! One [`Controller::poll`] is one pass of the light's main loop:
//!
//! 1. Sample the matchplay and volume switches
//! 2. Drain the serial receiver through the frame pipeline, applying every
//!    accepted command
//! 3. Tick the countdown and the buzzer
//! 4. Reapply brightness if the switch moved
//! 5. Flush the display if anything changed and no frame is half received
//!
//! Nothing blocks. The caller supplies the time and yields between passes.

use heapless::Vec;
use rangelight_hal::UartRx;
use rangelight_protocol::{Command, Detail, FrameError, FrameEvent, FrameReceiver, MAX_FRAME_LEN};

use crate::config::LightConfig;
use crate::state::{CommandOutcome, CountdownTick, DeviceStateMachine};
use crate::traits::{Brightness, Buzzer, DisplayError, IndicatorDisplay, SwitchInputs};

/// Events kept per pass; the rest are counted in `events_dropped`
pub const MAX_EVENTS_PER_POLL: usize = 16;

/// Something worth logging that happened during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Header mismatch; `dropped` bytes discarded (consecutive drops merged)
    Resync { dropped: u16 },
    /// Header matched, waiting for `frame_len` bytes
    HeaderLocked { frame_len: u8 },
    /// Complete frame discarded
    FrameRejected(FrameError),
    /// Valid command decoded and handed to the state machine
    CommandReceived {
        command: Command,
        outcome: CommandOutcome,
    },
    Countdown(CountdownTick),
    BuzzerFinished,
    BrightnessChanged(Brightness),
    MatchplayModeChanged(Detail),
    /// Serial read failed; draining stopped for this pass
    ReadError,
    /// Display flush failed; retried next pass
    FlushFailed(DisplayError),
}

/// Cumulative link counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub bytes_received: u32,
    pub bytes_resynced: u32,
    pub frames_accepted: u32,
    pub frames_rejected: u32,
    pub commands_ignored: u32,
    pub read_errors: u32,
    pub flushes: u32,
    pub flush_failures: u32,
    pub events_dropped: u32,
}

/// Outcome of one pass
#[derive(Debug, Clone, Default)]
pub struct PollReport {
    pub events: Vec<LinkEvent, MAX_EVENTS_PER_POLL>,
    pub events_dropped: u16,
    /// The display was flushed on this pass
    pub flushed: bool,
}

impl PollReport {
    fn record(&mut self, event: LinkEvent) {
        if let (LinkEvent::Resync { dropped: more }, Some(LinkEvent::Resync { dropped })) =
            (event, self.events.last_mut())
        {
            *dropped = dropped.saturating_add(more);
            return;
        }

        if self.events.push(event).is_err() {
            self.events_dropped = self.events_dropped.saturating_add(1);
        }
    }

    /// Commands accepted on this pass, in arrival order
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.events.iter().filter_map(|event| match event {
            LinkEvent::CommandReceived { command, .. } => Some(command),
            _ => None,
        })
    }
}

/// Owns the receive pipeline and the state machine
#[derive(Debug, Clone)]
pub struct Controller {
    receiver: FrameReceiver,
    machine: DeviceStateMachine,
    /// Last applied brightness; `None` until the first pass
    brightness: Option<Brightness>,
    stats: LinkStats,
}

impl Controller {
    /// The receive buffer always holds at least one maximum-length frame
    pub fn new(config: LightConfig) -> Self {
        let capacity = usize::from(config.rx_buffer_capacity).max(MAX_FRAME_LEN);
        Self {
            receiver: FrameReceiver::new(capacity),
            machine: DeviceStateMachine::new(config),
            brightness: None,
            stats: LinkStats::default(),
        }
    }

    /// Power-on state: blank panel
    pub fn start<D: IndicatorDisplay>(&mut self, display: &mut D) {
        self.machine.enter_blank(display);
    }

    pub fn machine(&self) -> &DeviceStateMachine {
        &self.machine
    }

    pub fn receiver(&self) -> &FrameReceiver {
        &self.receiver
    }

    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    /// Run one pass of the control loop at `now_ms`
    pub fn poll<R, I, D, B>(
        &mut self,
        now_ms: u64,
        rx: &mut R,
        inputs: &mut I,
        display: &mut D,
        buzzer: &mut B,
    ) -> PollReport
    where
        R: UartRx,
        I: SwitchInputs,
        D: IndicatorDisplay,
        B: Buzzer,
    {
        let mut report = PollReport::default();

        let mode = inputs.matchplay_mode();
        if self.machine.set_matchplay_mode(mode) {
            report.record(LinkEvent::MatchplayModeChanged(mode));
        }
        let volume = inputs.volume();

        while rx.bytes_available() {
            let Ok(byte) = rx.read_byte() else {
                self.stats.read_errors = self.stats.read_errors.wrapping_add(1);
                report.record(LinkEvent::ReadError);
                break;
            };
            self.stats.bytes_received = self.stats.bytes_received.wrapping_add(1);

            match self.receiver.push(byte) {
                FrameEvent::Pending => {}
                FrameEvent::Resync { .. } => {
                    self.stats.bytes_resynced = self.stats.bytes_resynced.wrapping_add(1);
                    report.record(LinkEvent::Resync { dropped: 1 });
                }
                FrameEvent::HeaderLocked { frame_len } => {
                    report.record(LinkEvent::HeaderLocked { frame_len });
                }
                FrameEvent::Rejected(e) => {
                    self.stats.frames_rejected = self.stats.frames_rejected.wrapping_add(1);
                    report.record(LinkEvent::FrameRejected(e));
                }
                FrameEvent::Accepted(command) => {
                    self.stats.frames_accepted = self.stats.frames_accepted.wrapping_add(1);
                    let outcome = self.machine.apply(&command, now_ms, volume, display, buzzer);
                    if matches!(outcome, CommandOutcome::IgnoredMatchplay { .. }) {
                        self.stats.commands_ignored = self.stats.commands_ignored.wrapping_add(1);
                    }
                    report.record(LinkEvent::CommandReceived { command, outcome });
                }
            }
        }

        let tick = self.machine.tick(now_ms, volume, display, buzzer);
        if let Some(step) = tick.countdown {
            report.record(LinkEvent::Countdown(step));
        }
        if tick.buzzer_finished {
            report.record(LinkEvent::BuzzerFinished);
        }

        let brightness = inputs.brightness();
        if self.brightness != Some(brightness) {
            self.brightness = Some(brightness);
            display.set_brightness(brightness);
            self.machine.mark_dirty();
            report.record(LinkEvent::BrightnessChanged(brightness));
        }

        if self.machine.is_dirty() && !self.receiver.in_frame() {
            match display.flush() {
                Ok(()) => {
                    self.machine.clear_dirty();
                    self.stats.flushes = self.stats.flushes.wrapping_add(1);
                    report.flushed = true;
                }
                Err(e) => {
                    self.stats.flush_failures = self.stats.flush_failures.wrapping_add(1);
                    report.record(LinkEvent::FlushFailed(e));
                }
            }
        }

        self.stats.events_dropped = self
            .stats
            .events_dropped
            .wrapping_add(u32::from(report.events_dropped));
        report
    }
}
