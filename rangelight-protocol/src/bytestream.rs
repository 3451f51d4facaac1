//! Byte stream with independent read and write cursors
//!
//! The receive buffer of the light. Bytes are appended as they come off the
//! serial line and read back with big-endian accessors, matching the
//! network byte order the controller writes.
//!
//! Out-of-range access never fails:
//! - appending to a full stream silently drops the byte
//! - reading or peeking past `size` yields zero
//! - cursor setters clamp into their valid range
//!
//! The only fallible operation is [`ByteStream::resize`], which reports an
//! allocation failure and leaves the stream untouched.

use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::fmt;

/// Default stream capacity in bytes
pub const DEFAULT_CAPACITY: usize = 64;

/// Errors reported by [`ByteStream`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamError {
    /// The allocator could not provide the requested capacity
    AllocationFailed,
}

impl From<TryReserveError> for StreamError {
    fn from(_: TryReserveError) -> Self {
        StreamError::AllocationFailed
    }
}

/// Growable byte buffer with reader and writer cursors
///
/// Invariant after every call: `reader_index <= size <= capacity` and
/// `writer_index <= capacity`.
#[derive(Clone)]
pub struct ByteStream {
    buffer: Vec<u8>,
    size: usize,
    reader_index: usize,
    writer_index: usize,
}

impl Default for ByteStream {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ByteStream {
    /// Create a stream with a fixed capacity
    pub fn new(capacity: usize) -> Self {
        let mut buffer = Vec::new();
        buffer.resize(capacity, 0);
        Self {
            buffer,
            size: 0,
            reader_index: 0,
            writer_index: 0,
        }
    }

    /// Create a stream, reporting allocation failure instead of aborting
    pub fn try_new(capacity: usize) -> Result<Self, StreamError> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(capacity)?;
        buffer.resize(capacity, 0);
        Ok(Self {
            buffer,
            size: 0,
            reader_index: 0,
            writer_index: 0,
        })
    }

    // ---- sizing ----

    /// Change the capacity of the stream
    ///
    /// Content up to `min(old, new)` capacity is preserved; cursors and size
    /// are clamped into the new capacity. On allocation failure the stream
    /// is left exactly as it was.
    pub fn resize(&mut self, capacity: usize) -> Result<(), StreamError> {
        if capacity > self.buffer.len() {
            self.buffer
                .try_reserve_exact(capacity - self.buffer.len())?;
        }
        self.buffer.resize(capacity, 0);
        self.buffer.shrink_to(capacity);

        self.size = self.size.min(capacity);
        self.reader_index = self.reader_index.min(self.size);
        self.writer_index = self.writer_index.min(capacity);
        Ok(())
    }

    /// Reset size and both cursors to zero
    ///
    /// Stale bytes are left in memory but are unreachable through the
    /// public accessors.
    pub fn clear(&mut self) {
        self.size = 0;
        self.reader_index = 0;
        self.writer_index = 0;
    }

    // ---- properties ----

    /// Maximum number of bytes the stream can hold
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of bytes written
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether nothing has been written since the last clear
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Bytes between the reader index and the end of written data
    pub fn readable_bytes(&self) -> usize {
        self.size - self.reader_index
    }

    /// Bytes that can still be appended at the writer index
    pub fn writable_bytes(&self) -> usize {
        self.capacity() - self.writer_index
    }

    pub fn reader_index(&self) -> usize {
        self.reader_index
    }

    /// Move the reader cursor, clamped to `[0, size]`
    pub fn set_reader_index(&mut self, index: usize) {
        self.reader_index = index.min(self.size);
    }

    pub fn writer_index(&self) -> usize {
        self.writer_index
    }

    /// Move the writer cursor, clamped to `[0, capacity]`
    pub fn set_writer_index(&mut self, index: usize) {
        self.writer_index = index.min(self.capacity());
    }

    /// View of the unread bytes
    pub fn readable(&self) -> &[u8] {
        &self.buffer[self.reader_index..self.size]
    }

    // ---- skipping / compaction ----

    /// Advance the reader cursor by `count` bytes, clamped to `size`
    pub fn skip(&mut self, count: usize) {
        self.set_reader_index(self.reader_index.saturating_add(count));
    }

    /// Drop every byte before the reader index
    ///
    /// Unread bytes move to the front, the reader index becomes zero and the
    /// writer index is placed right after the remaining data.
    pub fn discard_read_bytes(&mut self) {
        self.buffer.copy_within(self.reader_index..self.size, 0);
        self.size -= self.reader_index;
        self.reader_index = 0;
        self.writer_index = self.size;
    }

    // ---- single bytes ----

    /// Read the byte `offset` positions past the reader index
    pub fn peek(&self, offset: usize) -> u8 {
        match self.reader_index.checked_add(offset) {
            Some(index) if index < self.size => self.buffer[index],
            _ => 0,
        }
    }

    /// Read the byte at the reader index and advance past it
    pub fn consume(&mut self) -> u8 {
        if self.reader_index >= self.size {
            return 0;
        }
        let byte = self.buffer[self.reader_index];
        self.reader_index += 1;
        byte
    }

    /// Write one byte at the writer index
    ///
    /// Silently dropped once the writer index reaches capacity. A gap left
    /// by moving the writer index past `size` is zero-filled, so bytes from
    /// before a [`clear`](Self::clear) never become readable again.
    pub fn append(&mut self, byte: u8) {
        if self.writer_index >= self.capacity() {
            return;
        }
        if self.writer_index > self.size {
            self.buffer[self.size..self.writer_index].fill(0);
        }
        self.buffer[self.writer_index] = byte;
        self.writer_index += 1;
        self.size = self.size.max(self.writer_index);
    }

    /// Append every byte of `bytes`, dropping whatever does not fit
    pub fn append_slice(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.append(byte);
        }
    }

    // ---- big-endian composition ----

    fn peek_array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut bytes = [0u8; N];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.peek(offset.saturating_add(i));
        }
        bytes
    }

    fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut bytes = [0u8; N];
        for byte in bytes.iter_mut() {
            *byte = self.consume();
        }
        bytes
    }

    pub fn peek_i8(&self, offset: usize) -> i8 {
        self.peek(offset) as i8
    }

    pub fn peek_u16(&self, offset: usize) -> u16 {
        u16::from_be_bytes(self.peek_array(offset))
    }

    pub fn peek_i16(&self, offset: usize) -> i16 {
        i16::from_be_bytes(self.peek_array(offset))
    }

    pub fn peek_u32(&self, offset: usize) -> u32 {
        u32::from_be_bytes(self.peek_array(offset))
    }

    pub fn peek_i32(&self, offset: usize) -> i32 {
        i32::from_be_bytes(self.peek_array(offset))
    }

    pub fn peek_u64(&self, offset: usize) -> u64 {
        u64::from_be_bytes(self.peek_array(offset))
    }

    pub fn peek_i64(&self, offset: usize) -> i64 {
        i64::from_be_bytes(self.peek_array(offset))
    }

    pub fn peek_f32(&self, offset: usize) -> f32 {
        f32::from_bits(self.peek_u32(offset))
    }

    pub fn peek_f64(&self, offset: usize) -> f64 {
        f64::from_bits(self.peek_u64(offset))
    }

    pub fn read_i8(&mut self) -> i8 {
        self.consume() as i8
    }

    pub fn read_u16(&mut self) -> u16 {
        u16::from_be_bytes(self.read_array())
    }

    pub fn read_i16(&mut self) -> i16 {
        i16::from_be_bytes(self.read_array())
    }

    pub fn read_u32(&mut self) -> u32 {
        u32::from_be_bytes(self.read_array())
    }

    pub fn read_i32(&mut self) -> i32 {
        i32::from_be_bytes(self.read_array())
    }

    pub fn read_u64(&mut self) -> u64 {
        u64::from_be_bytes(self.read_array())
    }

    pub fn read_i64(&mut self) -> i64 {
        i64::from_be_bytes(self.read_array())
    }

    pub fn read_f32(&mut self) -> f32 {
        f32::from_bits(self.read_u32())
    }

    pub fn read_f64(&mut self) -> f64 {
        f64::from_bits(self.read_u64())
    }

    pub fn write_i8(&mut self, value: i8) {
        self.append(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.append_slice(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.append_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.append_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.append_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.append_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.append_slice(&value.to_be_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }
}

impl fmt::Debug for ByteStream {
    /// Hex dump of the written bytes, e.g. `ByteStream[5/320 r=1] A4 11 E4 D8 19`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ByteStream[{}/{} r={}]",
            self.size,
            self.capacity(),
            self.reader_index
        )?;
        for byte in &self.buffer[..self.size] {
            write!(f, " {:02X}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_append_and_consume() {
        let mut stream = ByteStream::new(8);
        stream.append(0x12);
        stream.append(0x34);

        assert_eq!(stream.size(), 2);
        assert_eq!(stream.readable_bytes(), 2);
        assert_eq!(stream.consume(), 0x12);
        assert_eq!(stream.consume(), 0x34);
        assert_eq!(stream.readable_bytes(), 0);
    }

    #[test]
    fn test_reads_past_size_are_zero() {
        let mut stream = ByteStream::new(8);
        stream.append(0xFF);

        assert_eq!(stream.peek(1), 0);
        assert_eq!(stream.peek(usize::MAX), 0);
        assert_eq!(stream.consume(), 0xFF);
        assert_eq!(stream.consume(), 0);
        assert_eq!(stream.reader_index(), 1);
    }

    #[test]
    fn test_append_saturates_at_capacity() {
        let mut stream = ByteStream::new(2);
        stream.append_slice(&[1, 2, 3, 4]);

        assert_eq!(stream.size(), 2);
        assert_eq!(stream.writable_bytes(), 0);
        assert_eq!(stream.readable(), &[1, 2]);
    }

    #[test]
    fn test_partial_multibyte_read_pads_with_zero() {
        let mut stream = ByteStream::new(8);
        stream.append_slice(&[0xAB, 0xCD]);

        // Two real bytes followed by two zeros
        assert_eq!(stream.read_u32(), 0xABCD_0000);
    }

    #[test]
    fn test_big_endian_layout() {
        let mut stream = ByteStream::new(16);
        stream.write_u32(0x0102_0304);
        stream.write_i16(-2);

        assert_eq!(stream.readable(), &[0x01, 0x02, 0x03, 0x04, 0xFF, 0xFE]);
        assert_eq!(stream.peek_u16(1), 0x0203);
        assert_eq!(stream.read_u32(), 0x0102_0304);
        assert_eq!(stream.read_i16(), -2);
    }

    #[test]
    fn test_cursor_setters_clamp() {
        let mut stream = ByteStream::new(8);
        stream.append_slice(&[1, 2, 3]);

        stream.set_reader_index(10);
        assert_eq!(stream.reader_index(), 3);

        stream.set_writer_index(10);
        assert_eq!(stream.writer_index(), 8);

        stream.skip(usize::MAX);
        assert_eq!(stream.reader_index(), 3);
    }

    #[test]
    fn test_overwrite_does_not_grow_size() {
        let mut stream = ByteStream::new(4);
        stream.append_slice(&[1, 2, 3, 4]);
        stream.set_writer_index(0);
        stream.append(9);

        assert_eq!(stream.size(), 4);
        assert_eq!(stream.readable(), &[9, 2, 3, 4]);
    }

    #[test]
    fn test_discard_read_bytes_shifts_unread() {
        let mut stream = ByteStream::new(8);
        stream.append_slice(&[0xA0, 0xA4, 0x11, 0xE4, 0xD8]);

        stream.set_reader_index(1);
        stream.discard_read_bytes();

        assert_eq!(stream.reader_index(), 0);
        assert_eq!(stream.size(), 4);
        assert_eq!(stream.writer_index(), 4);
        assert_eq!(stream.readable(), &[0xA4, 0x11, 0xE4, 0xD8]);

        // Next append lands right after the shifted data
        stream.append(0x19);
        assert_eq!(stream.peek(4), 0x19);
    }

    #[test]
    fn test_clear_resets_counters() {
        let mut stream = ByteStream::new(8);
        stream.append_slice(&[1, 2, 3]);
        stream.consume();
        stream.clear();

        assert!(stream.is_empty());
        assert_eq!(stream.reader_index(), 0);
        assert_eq!(stream.writer_index(), 0);
        // Stale byte is not reachable
        assert_eq!(stream.peek(0), 0);
    }

    #[test]
    fn test_writer_gap_after_clear_reads_zero() {
        let mut stream = ByteStream::new(8);
        stream.append_slice(&[0xA4, 0x11, 0xE4, 0xD8]);
        stream.clear();

        stream.set_writer_index(3);
        stream.append(0x19);

        assert_eq!(stream.size(), 4);
        assert_eq!(stream.readable(), &[0, 0, 0, 0x19]);
        assert_eq!(stream.read_u32(), 0x19);
    }

    #[test]
    fn test_resize_preserves_prefix() {
        let mut stream = ByteStream::new(4);
        stream.append_slice(&[1, 2, 3, 4]);
        stream.consume();

        stream.resize(2).unwrap();
        assert_eq!(stream.capacity(), 2);
        assert_eq!(stream.size(), 2);
        assert_eq!(stream.reader_index(), 1);
        assert_eq!(stream.readable(), &[2]);

        stream.resize(6).unwrap();
        assert_eq!(stream.capacity(), 6);
        assert_eq!(stream.size(), 2);
        stream.append(7);
        assert_eq!(stream.readable(), &[2, 7]);
    }

    #[test]
    fn test_resize_failure_leaves_stream_untouched() {
        let mut stream = ByteStream::new(4);
        stream.append_slice(&[1, 2, 3]);

        let result = stream.resize(usize::MAX);
        assert_eq!(result, Err(StreamError::AllocationFailed));
        assert_eq!(stream.capacity(), 4);
        assert_eq!(stream.readable(), &[1, 2, 3]);
    }

    #[test]
    fn test_try_new_reports_allocation_failure() {
        assert!(matches!(
            ByteStream::try_new(usize::MAX),
            Err(StreamError::AllocationFailed)
        ));
        assert_eq!(ByteStream::try_new(16).map(|s| s.capacity()), Ok(16));
    }

    #[test]
    fn test_debug_dump() {
        let mut stream = ByteStream::new(8);
        stream.append_slice(&[0xA4, 0x11]);
        assert_eq!(format!("{:?}", stream), "ByteStream[2/8 r=0] A4 11");
    }
}
