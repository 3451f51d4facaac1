//! Device state machine
//!
//! Owns the last accepted command, the countdown clock and the buzzer pulse
//! train, and turns commands and the passage of time into display and buzzer
//! intents. Time is always passed in; nothing here reads a clock.

pub mod buzzer;
pub mod events;
pub mod machine;

pub use buzzer::{BuzzerSchedule, BuzzerStep};
pub use events::{CommandOutcome, CountdownTick, TickReport};
pub use machine::{DeviceState, DeviceStateMachine, DisplayMode};
