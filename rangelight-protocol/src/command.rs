//! Command payload decoding and encoding
//!
//! A validated frame carries four big-endian 32-bit integers:
//!
//! ```text
//! ┌──────────────┬──────────┬─────────────┬───────────┐
//! │ CONTROL WORD │ TIME     │ START BEEPS │ END BEEPS │
//! │ 4B           │ 4B (i32) │ 4B (i32)    │ 4B (i32)  │
//! └──────────────┴──────────┴─────────────┴───────────┘
//! ```
//!
//! Control word layout (bit 0 = least significant):
//!
//! ```text
//! ____ __NL XYCD DccT
//! T  = time enabled
//! cc = colour (0 red, 1 amber, 2 green)
//! DD = detail (0 none, 1 A/B, 2 C/D)
//! C  = countdown active
//! Y  = matchplay
//! X  = emergency stop
//! L  = last end
//! N  = countdown continues
//! ```
//!
//! The raw word never leaves this module: callers only see [`Command`].

use crate::bytestream::ByteStream;

/// Size of the command payload in bytes
pub const PAYLOAD_LEN: usize = 16;

const BIT_TIME_ENABLED: u32 = 0;
const SHIFT_COLOUR: u32 = 1;
const SHIFT_DETAIL: u32 = 3;
const BIT_COUNTDOWN: u32 = 5;
const BIT_MATCHPLAY: u32 = 6;
const BIT_EMERGENCY_STOP: u32 = 7;
const BIT_LAST_END: u32 = 8;
const BIT_COUNTDOWN_CONTINUES: u32 = 9;
const FIELD_MASK: u32 = 0b11;

/// Traffic light colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Colour {
    #[default]
    Red,
    Amber,
    Green,
    /// Field value 3; carried through, drawn as nothing
    Reserved,
}

impl Colour {
    /// Decode a two-bit colour field
    pub fn from_bits(bits: u8) -> Self {
        match bits & FIELD_MASK as u8 {
            0 => Colour::Red,
            1 => Colour::Amber,
            2 => Colour::Green,
            _ => Colour::Reserved,
        }
    }

    pub fn to_bits(self) -> u8 {
        match self {
            Colour::Red => 0,
            Colour::Amber => 1,
            Colour::Green => 2,
            Colour::Reserved => 3,
        }
    }
}

/// Which pair of detail letters is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Detail {
    #[default]
    None,
    /// A/B detail (left target in matchplay)
    AB,
    /// C/D detail (right target in matchplay)
    CD,
    /// Field value 3; carried through, drawn as nothing
    Reserved,
}

impl Detail {
    /// Decode a two-bit detail field
    pub fn from_bits(bits: u8) -> Self {
        match bits & FIELD_MASK as u8 {
            0 => Detail::None,
            1 => Detail::AB,
            2 => Detail::CD,
            _ => Detail::Reserved,
        }
    }

    pub fn to_bits(self) -> u8 {
        match self {
            Detail::None => 0,
            Detail::AB => 1,
            Detail::CD => 2,
            Detail::Reserved => 3,
        }
    }
}

/// A decoded controller command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Show the time on the digit display
    pub time_enabled: bool,
    /// Traffic light colour
    pub colour: Colour,
    /// Detail letters to show
    pub detail: Detail,
    /// Countdown should be running
    pub countdown: bool,
    /// Command is addressed to one matchplay side (see `detail`)
    pub matchplay: bool,
    /// Emergency stop pressed on the controller
    pub emergency_stop: bool,
    /// Current end is the last of the match
    pub last_end: bool,
    /// The countdown now ending is followed by another
    pub countdown_continues: bool,
    /// Time to display, in seconds
    pub time: i32,
    /// Beeps at the start of the countdown
    pub start_beeps: i32,
    /// Beeps at the end of the countdown
    pub end_beeps: i32,
}

impl Command {
    /// Build a command from its four wire integers
    ///
    /// Total: every control word maps to a command. Bits 10-31 are ignored.
    pub fn from_words(control: u32, time: i32, start_beeps: i32, end_beeps: i32) -> Self {
        let bit = |index: u32| control & (1 << index) != 0;
        let field = |shift: u32| ((control >> shift) & FIELD_MASK) as u8;

        Self {
            time_enabled: bit(BIT_TIME_ENABLED),
            colour: Colour::from_bits(field(SHIFT_COLOUR)),
            detail: Detail::from_bits(field(SHIFT_DETAIL)),
            countdown: bit(BIT_COUNTDOWN),
            matchplay: bit(BIT_MATCHPLAY),
            emergency_stop: bit(BIT_EMERGENCY_STOP),
            last_end: bit(BIT_LAST_END),
            countdown_continues: bit(BIT_COUNTDOWN_CONTINUES),
            time,
            start_beeps,
            end_beeps,
        }
    }

    /// Decode a command from the next 16 bytes of the stream
    ///
    /// Missing bytes read as zero, so a short stream still yields a command.
    pub fn decode(stream: &mut ByteStream) -> Self {
        let control = stream.read_u32();
        let time = stream.read_i32();
        let start_beeps = stream.read_i32();
        let end_beeps = stream.read_i32();
        Self::from_words(control, time, start_beeps, end_beeps)
    }

    /// Pack the flag and enum fields into a control word
    pub fn to_word(&self) -> u32 {
        let flag = |set: bool, index: u32| (set as u32) << index;

        flag(self.time_enabled, BIT_TIME_ENABLED)
            | (self.colour.to_bits() as u32) << SHIFT_COLOUR
            | (self.detail.to_bits() as u32) << SHIFT_DETAIL
            | flag(self.countdown, BIT_COUNTDOWN)
            | flag(self.matchplay, BIT_MATCHPLAY)
            | flag(self.emergency_stop, BIT_EMERGENCY_STOP)
            | flag(self.last_end, BIT_LAST_END)
            | flag(self.countdown_continues, BIT_COUNTDOWN_CONTINUES)
    }

    /// Serialize to the 16-byte payload
    pub fn to_payload(&self) -> [u8; PAYLOAD_LEN] {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[0..4].copy_from_slice(&self.to_word().to_be_bytes());
        payload[4..8].copy_from_slice(&self.time.to_be_bytes());
        payload[8..12].copy_from_slice(&self.start_beeps.to_be_bytes());
        payload[12..16].copy_from_slice(&self.end_beeps.to_be_bytes());
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_enabled_only() {
        let cmd = Command::from_words(0b1, 42, 0, 0);
        assert!(cmd.time_enabled);
        assert_eq!(cmd.colour, Colour::Red);
        assert_eq!(cmd.detail, Detail::None);
        assert!(!cmd.countdown);
        assert!(!cmd.matchplay);
        assert!(!cmd.emergency_stop);
        assert_eq!(cmd.time, 42);
    }

    #[test]
    fn test_every_flag_bit() {
        assert!(Command::from_words(1 << 5, 0, 0, 0).countdown);
        assert!(Command::from_words(1 << 6, 0, 0, 0).matchplay);
        assert!(Command::from_words(1 << 7, 0, 0, 0).emergency_stop);
        assert!(Command::from_words(1 << 8, 0, 0, 0).last_end);
        assert!(Command::from_words(1 << 9, 0, 0, 0).countdown_continues);
    }

    #[test]
    fn test_colour_and_detail_fields() {
        // Green (2 << 1), C/D (2 << 3)
        let cmd = Command::from_words(0b10100, 0, 0, 0);
        assert_eq!(cmd.colour, Colour::Green);
        assert_eq!(cmd.detail, Detail::CD);

        // Amber, A/B
        let cmd = Command::from_words(0b01010, 0, 0, 0);
        assert_eq!(cmd.colour, Colour::Amber);
        assert_eq!(cmd.detail, Detail::AB);
    }

    #[test]
    fn test_reserved_values_are_kept() {
        let cmd = Command::from_words(0b11110, 0, 0, 0);
        assert_eq!(cmd.colour, Colour::Reserved);
        assert_eq!(cmd.detail, Detail::Reserved);
    }

    #[test]
    fn test_upper_bits_ignored() {
        let cmd = Command::from_words(0xFFFF_FC00, 0, 0, 0);
        assert_eq!(cmd, Command::default());
    }

    #[test]
    fn test_decode_from_stream() {
        let mut stream = ByteStream::new(32);
        stream.write_u32(0b10_0010_0001); // continues, countdown, time
        stream.write_i32(120);
        stream.write_i32(2);
        stream.write_i32(3);

        let cmd = Command::decode(&mut stream);
        assert!(cmd.time_enabled);
        assert!(cmd.countdown);
        assert!(cmd.countdown_continues);
        assert_eq!(cmd.time, 120);
        assert_eq!(cmd.start_beeps, 2);
        assert_eq!(cmd.end_beeps, 3);
        assert_eq!(stream.readable_bytes(), 0);
    }

    #[test]
    fn test_payload_layout() {
        let cmd = Command {
            time_enabled: true,
            colour: Colour::Green,
            countdown: true,
            time: 240,
            start_beeps: 2,
            end_beeps: 3,
            ..Default::default()
        };

        let payload = cmd.to_payload();
        assert_eq!(&payload[0..4], &[0, 0, 0, 0b0010_0101]);
        assert_eq!(&payload[4..8], &[0, 0, 0, 240]);
        assert_eq!(&payload[8..12], &[0, 0, 0, 2]);
        assert_eq!(&payload[12..16], &[0, 0, 0, 3]);
    }
}
