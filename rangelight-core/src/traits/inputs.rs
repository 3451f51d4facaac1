//! Front panel switches

use rangelight_protocol::Detail;

use super::{Brightness, Volume};

/// The light's physical switches
///
/// Sampled fresh on every pass of the control loop.
pub trait SwitchInputs {
    /// Brightness switch position
    fn brightness(&mut self) -> Brightness;

    /// Volume switch position
    fn volume(&mut self) -> Volume;

    /// Which matchplay side this light serves
    ///
    /// Only `Detail::AB` and `Detail::CD` are meaningful.
    fn matchplay_mode(&mut self) -> Detail;
}
