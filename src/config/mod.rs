//! Configuration for the Microflake generator

mod builder;

use std::time::Duration;

use thiserror::Error;

pub use builder::MicroflakeConfigBuilder;
use builder::{
    DEFAULT_MAX_WAIT, DEFAULT_PRESET, DEFAULT_SPIN_ENABLED, DEFAULT_SPIN_LOOPS,
    DEFAULT_SPIN_YIELD_EVERY, DEFAULT_STARTING_SEQUENCE, MAX_WAIT_LIMIT,
};

use crate::layout::{Layout, TimeUnit};
use crate::time::DEFAULT_EPOCH_MS;

/// Errors raised while validating configuration or constructing a generator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Instance and sequence fields leave no room for a timestamp
    #[error("Instance bits {instance_bits} and sequence bits {sequence_bits} leave no room for a timestamp")]
    InvalidWidths { instance_bits: u8, sequence_bits: u8 },
    #[error("Instance ID {instance_id} is invalid. Maximum allowed value is {max}")]
    InvalidInstanceId { instance_id: u64, max: u64 },
    #[error("Starting sequence {sequence} is invalid. Maximum allowed value is {max}")]
    InvalidStartingSequence { sequence: u64, max: u64 },
    #[error("Epoch {epoch} is later than the current time {now}")]
    EpochInFuture { epoch: u64, now: u64 },
    /// The clock is already past the last timestamp the layout can encode
    #[error("Timestamp {timestamp} since epoch exceeds the layout maximum of {max}")]
    LayoutExpired { timestamp: u64, max: u64 },
}

/// Configuration for the Microflake generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicroflakeConfig {
    layout: Layout,
    epoch: u64,
    starting_sequence: u64,
    spin_enabled: bool,
    spin_loops: u32,
    spin_yield_every: u32,
    max_wait: Duration,
}

impl MicroflakeConfig {
    /// Default epoch expressed in ticks of `unit`
    #[inline]
    pub const fn default_epoch(unit: TimeUnit) -> u64 {
        DEFAULT_EPOCH_MS * unit.per_millisecond()
    }

    pub(crate) fn from_builder(b: MicroflakeConfigBuilder) -> Result<Self, ConfigError> {
        let max = b.layout.max_sequence();
        if b.starting_sequence > max {
            return Err(ConfigError::InvalidStartingSequence {
                sequence: b.starting_sequence,
                max,
            });
        }
        Ok(Self {
            layout: b.layout,
            epoch: b
                .epoch
                .unwrap_or_else(|| Self::default_epoch(b.layout.unit())),
            starting_sequence: b.starting_sequence,
            spin_enabled: b.spin_enabled,
            spin_loops: b.spin_loops,
            spin_yield_every: b.spin_yield_every,
            max_wait: b.max_wait.min(MAX_WAIT_LIMIT),
        })
    }

    /// Create a new configuration builder
    pub const fn builder() -> MicroflakeConfigBuilder {
        MicroflakeConfigBuilder::new()
    }

    #[inline(always)]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    #[inline(always)]
    pub const fn unit(&self) -> TimeUnit {
        self.layout.unit()
    }

    #[inline(always)]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    #[inline(always)]
    pub const fn instance_bits(&self) -> u8 {
        self.layout.instance_bits()
    }

    #[inline(always)]
    pub const fn sequence_bits(&self) -> u8 {
        self.layout.sequence_bits()
    }

    #[inline(always)]
    pub const fn max_instance_id(&self) -> u64 {
        self.layout.max_instance()
    }

    #[inline(always)]
    pub const fn max_sequence(&self) -> u64 {
        self.layout.max_sequence()
    }

    #[inline(always)]
    pub const fn starting_sequence(&self) -> u64 {
        self.starting_sequence
    }

    #[inline(always)]
    pub const fn spin_enabled(&self) -> bool {
        self.spin_enabled
    }

    #[inline(always)]
    pub const fn spin_loops(&self) -> u32 {
        self.spin_loops
    }

    #[inline(always)]
    pub const fn spin_yield_every(&self) -> u32 {
        self.spin_yield_every
    }

    #[inline(always)]
    pub const fn max_wait(&self) -> Duration {
        self.max_wait
    }
}

impl Default for MicroflakeConfig {
    fn default() -> Self {
        let layout = DEFAULT_PRESET.layout();
        Self {
            layout,
            epoch: Self::default_epoch(layout.unit()),
            starting_sequence: DEFAULT_STARTING_SEQUENCE,
            spin_enabled: DEFAULT_SPIN_ENABLED,
            spin_loops: DEFAULT_SPIN_LOOPS,
            spin_yield_every: DEFAULT_SPIN_YIELD_EVERY,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}
