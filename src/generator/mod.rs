//! Core Microflake generator implementation
//!
//! Split into modules for testability:
//! - `state` - Combined atomic state (last tick + sequence)
//! - `wait` - Spin and backoff strategies for an exhausted tick
//! - `generate` - ID generation logic

mod generate;
mod state;
mod wait;

use std::sync::atomic::AtomicU64;

use tracing::debug;

use crate::config::{ConfigError, MicroflakeConfig};
use crate::extractor::MicroflakeExtractor;
use crate::layout::TimeUnit;
use crate::time::{SystemClock, TimeSource};

pub use generate::Iter;
use state::State;

/// Main ID generator with cache-line alignment
#[derive(Debug)]
#[repr(align(64))]
pub struct Microflake<C = SystemClock> {
    // === Hot path fields ===
    pub(crate) state: AtomicU64,
    instance_prefix: u64,
    seq_bits: u8,
    max_seq: u64,
    ts_shift: u8,
    max_ts: u64,
    epoch: u64,
    unit: TimeUnit,
    clock: C,

    // === Cold path fields ===
    pub(crate) instance_id: u64,
    pub(crate) config: MicroflakeConfig,
    pub extract: MicroflakeExtractor,
}

impl Microflake {
    /// Create with default configuration (snowflake-ms layout)
    pub fn new(instance_id: u64) -> Result<Self, ConfigError> {
        Self::with_config(instance_id, MicroflakeConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(instance_id: u64, config: MicroflakeConfig) -> Result<Self, ConfigError> {
        Self::with_clock(instance_id, config, SystemClock)
    }
}

impl<C: TimeSource> Microflake<C> {
    /// Create with custom configuration and time source
    pub fn with_clock(
        instance_id: u64,
        config: MicroflakeConfig,
        clock: C,
    ) -> Result<Self, ConfigError> {
        Self::validate(instance_id, &config, &clock)?;
        debug!(
            instance_id,
            instance_bits = config.instance_bits(),
            sequence_bits = config.sequence_bits(),
            epoch = config.epoch(),
            "created identifier generator"
        );
        Ok(Self::build(instance_id, config, clock))
    }

    fn validate(instance_id: u64, config: &MicroflakeConfig, clock: &C) -> Result<(), ConfigError> {
        let max = config.max_instance_id();
        if instance_id > max {
            return Err(ConfigError::InvalidInstanceId { instance_id, max });
        }

        let now = clock.current_ticks(config.unit());
        let epoch = config.epoch();
        let Some(timestamp) = now.checked_sub(epoch) else {
            return Err(ConfigError::EpochInFuture { epoch, now });
        };

        let max = config.layout().max_timestamp();
        if timestamp > max {
            return Err(ConfigError::LayoutExpired { timestamp, max });
        }
        Ok(())
    }

    fn build(instance_id: u64, config: MicroflakeConfig, clock: C) -> Self {
        let layout = config.layout();
        Self {
            state: AtomicU64::new(State::NONE.raw()),
            instance_prefix: instance_id << layout.sequence_bits(),
            seq_bits: layout.sequence_bits(),
            max_seq: layout.max_sequence(),
            ts_shift: layout.shift(),
            max_ts: layout.max_timestamp(),
            epoch: config.epoch(),
            unit: layout.unit(),
            clock,
            instance_id,
            config,
            extract: MicroflakeExtractor::new(layout, config.epoch()),
        }
    }

    /// Current tick since the epoch, `None` if the clock reads before it
    #[inline(always)]
    pub(crate) fn now(&self) -> Option<u64> {
        self.clock.current_ticks(self.unit).checked_sub(self.epoch)
    }

    #[inline(always)]
    pub(crate) fn assemble_id(&self, tick: u64, sequence: u64) -> u64 {
        (tick << self.ts_shift) | self.instance_prefix | sequence
    }

    /// Ticks elapsed since the epoch, as the generator sees them
    #[inline]
    pub fn ticks_since_epoch(&self) -> Option<u64> {
        self.now()
    }

    #[inline]
    pub const fn instance_id(&self) -> u64 {
        self.instance_id
    }

    #[inline]
    pub const fn config(&self) -> &MicroflakeConfig {
        &self.config
    }
}
