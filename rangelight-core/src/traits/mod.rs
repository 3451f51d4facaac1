//! Hardware abstraction traits
//!
//! These traits define the interface between the light's logic and the
//! board: the LED panel, the buzzer and the three front-panel switches.

pub mod buzzer;
pub mod display;
pub mod inputs;

pub use buzzer::{Buzzer, Tone, Volume};
pub use display::{Brightness, Digits, DisplayError, IndicatorDisplay};
pub use inputs::SwitchInputs;
