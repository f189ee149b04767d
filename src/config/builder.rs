//! MicroflakeConfig builder for constructing configuration

use std::time::Duration;

use super::{ConfigError, MicroflakeConfig};
use crate::layout::{Layout, Preset, TimeUnit};

/// Default configuration values
pub(super) const DEFAULT_PRESET: Preset = Preset::SnowflakeMs;
pub(super) const DEFAULT_STARTING_SEQUENCE: u64 = 0;
pub(super) const DEFAULT_SPIN_ENABLED: bool = true;
pub(super) const DEFAULT_SPIN_LOOPS: u32 = 64;
pub(super) const DEFAULT_SPIN_YIELD_EVERY: u32 = 16;
pub(super) const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(10);
pub(super) const MAX_WAIT_LIMIT: Duration = Duration::from_secs(1);

/// Builder for MicroflakeConfig
#[derive(Debug, Clone)]
pub struct MicroflakeConfigBuilder {
    pub(super) layout: Layout,
    pub(super) epoch: Option<u64>,
    pub(super) starting_sequence: u64,
    pub(super) spin_enabled: bool,
    pub(super) spin_loops: u32,
    pub(super) spin_yield_every: u32,
    pub(super) max_wait: Duration,
}

impl MicroflakeConfigBuilder {
    /// Create a new MicroflakeConfigBuilder with default values
    pub const fn new() -> Self {
        Self {
            layout: DEFAULT_PRESET.layout(),
            epoch: None,
            starting_sequence: DEFAULT_STARTING_SEQUENCE,
            spin_enabled: DEFAULT_SPIN_ENABLED,
            spin_loops: DEFAULT_SPIN_LOOPS,
            spin_yield_every: DEFAULT_SPIN_YIELD_EVERY,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }

    /// Use one of the predefined layouts
    pub const fn preset(mut self, preset: Preset) -> Self {
        self.layout = preset.layout();
        self
    }

    /// Use custom field widths. Instance and sequence bits together must
    /// leave at least one timestamp bit.
    pub fn widths(
        mut self,
        unit: TimeUnit,
        instance_bits: u8,
        sequence_bits: u8,
    ) -> Result<Self, ConfigError> {
        self.layout = Layout::new(unit, instance_bits, sequence_bits).ok_or(
            ConfigError::InvalidWidths {
                instance_bits,
                sequence_bits,
            },
        )?;
        Ok(self)
    }

    /// Set the epoch in ticks of the layout's unit since the Unix epoch.
    /// Defaults to January 1, 2024 UTC.
    pub const fn epoch(mut self, epoch: u64) -> Self {
        self.epoch = Some(epoch);
        self
    }

    /// Sequence emitted with the very first identifier
    pub const fn starting_sequence(mut self, sequence: u64) -> Self {
        self.starting_sequence = sequence;
        self
    }

    /// Enable or disable micro spin before sleeping on overflow
    pub const fn enable_spin(mut self, enable: bool) -> Self {
        self.spin_enabled = enable;
        self
    }

    /// Set number of spin loops attempted before falling back to sleep
    pub const fn spin_loops(mut self, loops: u32) -> Self {
        self.spin_loops = loops;
        self
    }

    /// Set spin yield cadence. Yield every N spin iterations; 0 disables yielding
    pub const fn spin_yield_every(mut self, n: u32) -> Self {
        self.spin_yield_every = n;
        self
    }

    /// Longest time a call waits for the clock to leave an exhausted tick
    /// before returning `Pending`. Zero means only the spin phase runs.
    /// Values above one second are capped.
    pub const fn max_wait(mut self, wait: Duration) -> Self {
        self.max_wait = wait;
        self
    }

    /// Build the final MicroflakeConfig
    pub fn build(self) -> Result<MicroflakeConfig, ConfigError> {
        MicroflakeConfig::from_builder(self)
    }
}

impl Default for MicroflakeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
