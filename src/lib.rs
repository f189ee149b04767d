//! # Microflake
//!
//! Snowflake-style unique identifiers with configurable bit layouts.
//!
//! Generate 63-bit identifiers that are:
//! - 📈 Time-sorted
//! - 🔄 Strictly monotonic per generator
//! - 🔒 Thread-safe (lock-free CAS on one state word)
//! - 🌐 Unique across instances with distinct instance IDs
//! - ⏱️ Safe under clock regression and per-tick bursts

#![forbid(unsafe_code)]

mod config;
mod error;
mod extractor;
mod generator;
pub mod layout;
pub mod time;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::{ConfigError, MicroflakeConfig, MicroflakeConfigBuilder};
pub use error::MicroflakeError;
pub use extractor::MicroflakeExtractor;
pub use generator::{Iter, Microflake};
pub use layout::{decode, EncodingError, Layout, Preset, TimeUnit};
pub use time::{SystemClock, TimeSource};
