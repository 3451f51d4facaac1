//! UART serial receive abstraction
//!
//! The light only ever listens: the controller broadcasts and never expects
//! a reply, so there is no transmit side.

/// Non-blocking UART receiver
///
/// The control loop drains whatever is buffered on every pass and must never
/// wait for a byte that has not arrived yet.
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Check whether at least one byte can be read without blocking
    fn bytes_available(&mut self) -> bool;

    /// Read a single buffered byte
    ///
    /// Only called after [`bytes_available`](Self::bytes_available) returned
    /// `true`.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    /// 9600 8N1, the radio modem's fixed setting
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

/// Receiver that replays a byte slice
///
/// Used by host-side tests and simulations to feed recorded traffic into the
/// control loop. `limit` caps how many bytes one drain may observe, which
/// models bytes trickling in across several loop passes.
#[derive(Debug, Clone)]
pub struct SliceRx<'a> {
    data: &'a [u8],
    pos: usize,
    limit: Option<usize>,
    taken: usize,
}

impl<'a> SliceRx<'a> {
    /// Create a receiver that exposes all of `data` at once
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            limit: None,
            taken: 0,
        }
    }

    /// Create a receiver that exposes at most `per_pass` bytes per pass
    pub fn chunked(data: &'a [u8], per_pass: usize) -> Self {
        Self {
            data,
            pos: 0,
            limit: Some(per_pass),
            taken: 0,
        }
    }

    /// Start a new pass, re-arming the per-pass limit
    pub fn next_pass(&mut self) {
        self.taken = 0;
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl UartRx for SliceRx<'_> {
    type Error = core::convert::Infallible;

    fn bytes_available(&mut self) -> bool {
        let under_limit = self.limit.map_or(true, |limit| self.taken < limit);
        under_limit && self.pos < self.data.len()
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let byte = self.data.get(self.pos).copied().unwrap_or(0);
        self.pos = (self.pos + 1).min(self.data.len());
        self.taken += 1;
        Ok(byte)
    }
}
