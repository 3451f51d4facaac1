//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in rangelight-core on top of `embedded-hal` peripherals:
//!
//! - PWM buzzer with switch-selected volume
//! - Front panel switches (brightness, volume, matchplay side)
//! - Frame-buffered indicator panel
//! - Serial receiver over `embedded-io`

#![no_std]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod display;
pub mod serial;
pub mod switches;

pub use buzzer::PwmBuzzer;
pub use display::{FrameBufferDisplay, PanelFrame, PanelSink};
pub use serial::IoRx;
pub use switches::SwitchPanel;
