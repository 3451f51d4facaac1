//! Frame synchronization, validation and encoding
//!
//! Frame format:
//! - MAGIC (4 bytes): A4 11 E4 D8
//! - LENGTH (1 byte): total frame length, header included (5-255)
//! - CHECKSUM (4 bytes): big-endian sum of every byte after the checksum
//! - PAYLOAD: command payload, optionally followed by trailing bytes that
//!   count towards the checksum but are otherwise ignored
//!
//! A frame shorter than 25 bytes is still accepted: the missing checksum and
//! payload bytes read as zero.
//!
//! The receive side is split in two stages that share one [`ByteStream`]:
//! [`FrameSynchronizer`] locks onto the header one byte at a time, and
//! [`FrameValidator`] checks a complete frame and hands the payload to the
//! command decoder. [`FrameReceiver`] drives both from single bytes.

use heapless::Vec;

use crate::bytestream::ByteStream;
use crate::command::{Command, PAYLOAD_LEN};

/// Frame synchronization bytes
pub const MAGIC: [u8; 4] = [0xA4, 0x11, 0xE4, 0xD8];

/// Header length: magic plus the length byte
pub const HEADER_LEN: usize = MAGIC.len() + 1;

/// Checksum field length
pub const CHECKSUM_LEN: usize = 4;

/// Smallest frame that can carry a command
pub const MIN_FRAME_LEN: usize = HEADER_LEN + CHECKSUM_LEN + PAYLOAD_LEN;

/// Largest frame the length byte can describe
pub const MAX_FRAME_LEN: usize = u8::MAX as usize;

/// Receive buffer capacity used by the light
pub const RX_BUFFER_CAPACITY: usize = 320;

/// Errors that can occur during frame validation or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Transmitted checksum does not match the payload
    ChecksumMismatch { transmitted: u32, computed: u32 },
    /// Payload does not fit in a frame with a one-byte length
    PayloadTooLarge,
}

/// Wrapping byte sum used as the frame checksum
pub fn checksum(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |sum, &byte| sum.wrapping_add(byte as u32))
}

/// Build a complete frame around `payload`
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8, MAX_FRAME_LEN>, FrameError> {
    let total = HEADER_LEN + CHECKSUM_LEN + payload.len();
    if total > MAX_FRAME_LEN {
        return Err(FrameError::PayloadTooLarge);
    }

    let mut frame = Vec::new();
    frame
        .extend_from_slice(&MAGIC)
        .map_err(|_| FrameError::PayloadTooLarge)?;
    frame
        .push(total as u8)
        .map_err(|_| FrameError::PayloadTooLarge)?;
    frame
        .extend_from_slice(&checksum(payload).to_be_bytes())
        .map_err(|_| FrameError::PayloadTooLarge)?;
    frame
        .extend_from_slice(payload)
        .map_err(|_| FrameError::PayloadTooLarge)?;
    Ok(frame)
}

impl Command {
    /// Encode this command as a minimal 25-byte frame
    pub fn to_frame(&self) -> [u8; MIN_FRAME_LEN] {
        let payload = self.to_payload();
        let mut frame = [0u8; MIN_FRAME_LEN];
        frame[..MAGIC.len()].copy_from_slice(&MAGIC);
        frame[MAGIC.len()] = MIN_FRAME_LEN as u8;
        frame[HEADER_LEN..HEADER_LEN + CHECKSUM_LEN]
            .copy_from_slice(&checksum(&payload).to_be_bytes());
        frame[HEADER_LEN + CHECKSUM_LEN..].copy_from_slice(&payload);
        frame
    }
}

/// Result of inspecting the stream after a byte was appended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncStatus {
    /// Need more bytes
    Pending,
    /// Header did not match; the oldest byte was dropped
    Rejected { dropped: u8 },
    /// Header matched; waiting for `frame_len` bytes in total
    Locked { frame_len: u8 },
    /// The declared number of bytes is buffered
    Complete,
}

/// Header detection with one-byte resynchronization
#[derive(Debug, Clone, Default)]
pub struct FrameSynchronizer {
    expected_len: Option<u8>,
}

impl FrameSynchronizer {
    pub fn new() -> Self {
        Self { expected_len: None }
    }

    /// Declared frame length, once the header has matched
    pub fn expected_len(&self) -> Option<u8> {
        self.expected_len
    }

    /// Forget the locked header
    pub fn reset(&mut self) {
        self.expected_len = None;
    }

    /// Inspect the stream after one byte was appended to it
    ///
    /// The header is checked exactly when the fifth byte arrives. On a
    /// mismatch only the oldest byte is dropped, so a real header that
    /// starts inside the rejected window is found on a later byte. A length
    /// byte below [`HEADER_LEN`] can never complete and is handled like a
    /// magic mismatch. A length of exactly [`HEADER_LEN`] completes on the
    /// byte that locks the header.
    pub fn on_byte(&mut self, stream: &mut ByteStream) -> SyncStatus {
        if self.expected_len.is_none() && stream.size() == HEADER_LEN {
            let magic_matches = MAGIC
                .iter()
                .enumerate()
                .all(|(i, &expected)| stream.peek(i) == expected);
            let frame_len = stream.peek(MAGIC.len());

            if !magic_matches || (frame_len as usize) < HEADER_LEN {
                let dropped = stream.peek(0);
                stream.set_reader_index(1);
                stream.discard_read_bytes();
                return SyncStatus::Rejected { dropped };
            }

            self.expected_len = Some(frame_len);
            if frame_len as usize == HEADER_LEN {
                return SyncStatus::Complete;
            }
            return SyncStatus::Locked { frame_len };
        }

        match self.expected_len {
            Some(len) if stream.size() == len as usize => SyncStatus::Complete,
            _ => SyncStatus::Pending,
        }
    }
}

/// Checksum verification of a complete frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameValidator;

impl FrameValidator {
    /// Validate the frame buffered in `stream` and decode its command
    ///
    /// Reads from the start of the stream; the caller clears it afterwards.
    /// Fields past the end of a short frame read as zero.
    pub fn validate(stream: &mut ByteStream) -> Result<Command, FrameError> {
        stream.set_reader_index(0);
        stream.skip(HEADER_LEN);
        let transmitted = stream.read_u32();
        let computed = checksum(stream.readable());

        if transmitted != computed {
            return Err(FrameError::ChecksumMismatch {
                transmitted,
                computed,
            });
        }

        Ok(Command::decode(stream))
    }
}

/// What happened to one received byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameEvent {
    /// Byte buffered, nothing decided yet
    Pending,
    /// Header mismatch, `dropped` was shifted out
    Resync { dropped: u8 },
    /// Header matched
    HeaderLocked { frame_len: u8 },
    /// Complete frame failed validation and was discarded
    Rejected(FrameError),
    /// Complete, valid frame
    Accepted(Command),
}

/// Byte-at-a-time frame receiver
///
/// Owns the receive stream. A completed frame is always cleared from the
/// stream whether it validated or not; bytes after it are not kept, so one
/// frame is in flight at a time.
#[derive(Debug, Clone)]
pub struct FrameReceiver {
    stream: ByteStream,
    sync: FrameSynchronizer,
}

impl Default for FrameReceiver {
    fn default() -> Self {
        Self::new(RX_BUFFER_CAPACITY)
    }
}

impl FrameReceiver {
    /// Create a receiver with the given buffer capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            stream: ByteStream::new(capacity),
            sync: FrameSynchronizer::new(),
        }
    }

    /// Feed a single byte
    pub fn push(&mut self, byte: u8) -> FrameEvent {
        self.stream.append(byte);

        match self.sync.on_byte(&mut self.stream) {
            SyncStatus::Pending => FrameEvent::Pending,
            SyncStatus::Rejected { dropped } => FrameEvent::Resync { dropped },
            SyncStatus::Locked { frame_len } => FrameEvent::HeaderLocked { frame_len },
            SyncStatus::Complete => {
                let result = FrameValidator::validate(&mut self.stream);
                self.reset();
                match result {
                    Ok(command) => FrameEvent::Accepted(command),
                    Err(e) => FrameEvent::Rejected(e),
                }
            }
        }
    }

    /// Whether a header has locked and the frame is still incomplete
    pub fn in_frame(&self) -> bool {
        self.sync.expected_len().is_some()
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.stream.clear();
        self.sync.reset();
    }

    /// Buffered bytes, for diagnostics
    pub fn stream(&self) -> &ByteStream {
        &self.stream
    }
}
