//! Serial receiver over `embedded-io`
//!
//! Adapts any buffered reader that can report readiness (for example an
//! interrupt-driven buffered UART) to [`UartRx`].

use embedded_io::{Read, ReadExactError, ReadReady};
use rangelight_hal::UartRx;

/// [`UartRx`] over a buffered `embedded-io` reader
pub struct IoRx<R> {
    inner: R,
}

impl<R: Read + ReadReady> IoRx<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + ReadReady> UartRx for IoRx<R> {
    type Error = ReadExactError<R::Error>;

    fn bytes_available(&mut self) -> bool {
        // A readiness error surfaces on the next read instead
        self.inner.read_ready().unwrap_or(true)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        self.inner.read_exact(&mut byte)?;
        Ok(byte[0])
    }
}
