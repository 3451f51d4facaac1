//! Configuration types
//!
//! Board-agnostic timing and output levels. The firmware fills these from
//! `light.toml` at build time; `Default` gives the stock light.

pub mod types;

pub use types::*;
