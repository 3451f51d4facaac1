//! Rangelight Hardware Abstraction Layer
//!
//! This crate defines the transport abstraction the control loop polls for
//! incoming bytes. Chip-specific code (the RP2040 firmware, a host simulator,
//! test doubles) implements it so the receive pipeline never touches a
//! peripheral directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  rangelight-core (Controller)           │
//! └─────────────────────────────────────────┘
//!                     │ UartRx
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rangelight-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ firmware      │       │ test doubles  │
//! │ (buffered RX) │       │ (byte slices) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! Digital inputs and PWM outputs are covered by `embedded-hal` 1.0 and are
//! not redefined here.

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{SliceRx, UartConfig, UartRx};
