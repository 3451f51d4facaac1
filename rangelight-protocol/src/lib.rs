//! Rangelight Serial Command Protocol
//!
//! This crate defines the one-way serial protocol between the range
//! controller (transmitter) and each indicator light (receiver). The link is
//! fire-and-forget: the light never answers, so every fault is handled by
//! dropping data and waiting for the next frame.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌─────────────┬────────┬──────────┬────────────────────────────┐
//! │ MAGIC       │ LENGTH │ CHECKSUM │ PAYLOAD                    │
//! │ A4 11 E4 D8 │ 1B     │ 4B BE    │ control, time, start, end  │
//! └─────────────┴────────┴──────────┴────────────────────────────┘
//! ```
//!
//! - [`bytestream`]: receive buffer with big-endian accessors
//! - [`frame`]: header synchronization, checksum validation, encoding
//! - [`command`]: control word decoding into [`Command`]

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod bytestream;
pub mod command;
pub mod frame;

pub use bytestream::{ByteStream, StreamError};
pub use command::{Colour, Command, Detail, PAYLOAD_LEN};
pub use frame::{
    checksum, encode_frame, FrameError, FrameEvent, FrameReceiver, FrameSynchronizer,
    FrameValidator, SyncStatus, HEADER_LEN, MAGIC, MAX_FRAME_LEN, MIN_FRAME_LEN,
    RX_BUFFER_CAPACITY,
};
