//! Board-agnostic core logic for the range light firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (display, buzzer, switches)
//! - Device state machine (display modes, countdown, buzzer pulses)
//! - The control loop body tying the receive pipeline to the state machine
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod state;
pub mod traits;

#[cfg(test)]
mod testing;

pub use controller::{Controller, LinkEvent, LinkStats, PollReport, MAX_EVENTS_PER_POLL};
