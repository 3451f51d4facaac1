//! defmt output for the control loop

use defmt::*;
use rangelight_core::state::{CommandOutcome, CountdownTick};
use rangelight_core::{LinkEvent, LinkStats, PollReport};
use rangelight_protocol::{Colour, Command, Detail, FrameError};

pub fn log_report(report: &PollReport) {
    for event in &report.events {
        log_event(event);
    }
    if report.events_dropped > 0 {
        warn!("{} link events not logged", report.events_dropped);
    }
}

fn log_event(event: &LinkEvent) {
    match *event {
        LinkEvent::Resync { dropped } => trace!("Header failed, skipped {} bytes", dropped),
        LinkEvent::HeaderLocked { frame_len } => trace!("Valid header, expecting {} bytes", frame_len),
        LinkEvent::FrameRejected(FrameError::ChecksumMismatch {
            transmitted,
            computed,
        }) => warn!(
            "Checksum mismatch: transmitted {=u32:#010x}, computed {=u32:#010x}",
            transmitted, computed
        ),
        LinkEvent::FrameRejected(e) => warn!("Frame rejected: {}", e),
        LinkEvent::CommandReceived { command, outcome } => log_command(&command, outcome),
        LinkEvent::Countdown(CountdownTick::Step { time }) => trace!("Countdown: {}", time),
        LinkEvent::Countdown(CountdownTick::Ended) => info!("Countdown finished"),
        LinkEvent::Countdown(CountdownTick::Continued) => {
            info!("Countdown finished, next countdown pending")
        }
        LinkEvent::BuzzerFinished => debug!("Buzzer finished"),
        LinkEvent::BrightnessChanged(level) => info!("Brightness: {}", level),
        LinkEvent::MatchplayModeChanged(side) => info!("Matchplay side: {}", detail_name(side)),
        LinkEvent::ReadError => warn!("Serial read error"),
        LinkEvent::FlushFailed(e) => warn!("Display flush failed: {}", e),
    }
}

fn log_command(command: &Command, outcome: CommandOutcome) {
    if let CommandOutcome::IgnoredMatchplay { detail, mode } = outcome {
        debug!(
            "Ignoring matchplay command for {} (this light is {})",
            detail_name(detail),
            detail_name(mode)
        );
        return;
    }

    debug!(
        "Updated state:\n  countdown continues: {}\n  last end: {}\n  countdown: {}\n  detail: {}\n  colour: {}\n  show time: {}\n  time: {}\n  beeps: {}/{}",
        command.countdown_continues,
        command.last_end,
        command.countdown,
        detail_name(command.detail),
        colour_name(command.colour),
        command.time_enabled,
        command.time,
        command.start_beeps,
        command.end_beeps
    );

    match outcome {
        CommandOutcome::CountdownStarted { time } => info!("Countdown started at {}", time),
        CommandOutcome::CountdownStopped => info!("Countdown stopped"),
        CommandOutcome::EmergencyStop => warn!("Emergency stop"),
        _ => {}
    }
}

pub fn log_stats(stats: &LinkStats) {
    info!(
        "Link: {} bytes, {} frames ok, {} rejected, {} ignored, {} resync bytes, {} flushes",
        stats.bytes_received,
        stats.frames_accepted,
        stats.frames_rejected,
        stats.commands_ignored,
        stats.bytes_resynced,
        stats.flushes
    );
}

fn colour_name(colour: Colour) -> &'static str {
    match colour {
        Colour::Red => "Red",
        Colour::Amber => "Amber",
        Colour::Green => "Green",
        Colour::Reserved => "Reserved",
    }
}

fn detail_name(detail: Detail) -> &'static str {
    match detail {
        Detail::None => "None",
        Detail::AB => "A/B",
        Detail::CD => "C/D",
        Detail::Reserved => "Reserved",
    }
}
