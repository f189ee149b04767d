use thiserror::Error;

/// Per-call outcomes of `Microflake::next_id` other than a fresh identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MicroflakeError {
    /// The clock reads earlier than the last tick an identifier was issued for
    #[error("Clock moved backwards from tick {last} to {current}. Refusing to generate id")]
    ClockRegressed { last: u64, current: u64 },
    /// The clock reads earlier than the configured epoch
    #[error("Clock reading {reading} is before the epoch {epoch}. Refusing to generate id")]
    ClockBeforeEpoch { reading: u64, epoch: u64 },
    /// The sequence for the current tick is exhausted and the clock did not
    /// advance within the configured wait
    #[error("Sequence exhausted for the current tick. Retry at tick {yield_until}")]
    Pending { yield_until: u64 },
    /// The clock has run past the last timestamp the layout can encode
    #[error("Timestamp {timestamp} exceeds the layout maximum of {max}")]
    TimestampOverflow { timestamp: u64, max: u64 },
}

impl MicroflakeError {
    /// Whether retrying the call later can succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            MicroflakeError::ClockRegressed { .. }
                | MicroflakeError::ClockBeforeEpoch { .. }
                | MicroflakeError::Pending { .. }
        )
    }
}
