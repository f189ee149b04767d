//! Bit layout codec
//!
//! An identifier is a 63-bit value laid out as (most significant first):
//!
//! ```text
//! | 0 | timestamp (63 - shift bits) | instance (instance_bits) | sequence (sequence_bits) |
//! ```
//!
//! Bit 63 is always clear, so every identifier is also a valid positive `i64`.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Total number of usable bits in an identifier (the sign bit is never set)
pub const ID_BITS: u8 = 63;

/// Granularity of the clock and of the encoded timestamp field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millisecond,
    Microsecond,
}

impl TimeUnit {
    /// Number of ticks of this unit in one millisecond
    #[inline(always)]
    pub const fn per_millisecond(self) -> u64 {
        match self {
            TimeUnit::Millisecond => 1,
            TimeUnit::Microsecond => 1_000,
        }
    }

    /// Convert a tick count of this unit into a UTC date-time
    pub fn to_datetime(self, ticks: u64) -> Option<DateTime<Utc>> {
        let ticks = i64::try_from(ticks).ok()?;
        match self {
            TimeUnit::Millisecond => DateTime::from_timestamp_millis(ticks),
            TimeUnit::Microsecond => DateTime::from_timestamp_micros(ticks),
        }
    }
}

/// Well-known field layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Classic Snowflake: milliseconds, 10 instance bits, 12 sequence bits
    SnowflakeMs,
    /// Microseconds, 8 instance bits, 4 sequence bits
    MicroflakeV1,
    /// Microseconds, 6 instance bits, 4 sequence bits
    MicroflakeV2,
}

impl Preset {
    pub const fn layout(self) -> Layout {
        match self {
            Preset::SnowflakeMs => Layout::from_parts(TimeUnit::Millisecond, 10, 12),
            Preset::MicroflakeV1 => Layout::from_parts(TimeUnit::Microsecond, 8, 4),
            Preset::MicroflakeV2 => Layout::from_parts(TimeUnit::Microsecond, 6, 4),
        }
    }
}

impl From<Preset> for Layout {
    fn from(preset: Preset) -> Self {
        preset.layout()
    }
}

/// Errors raised by the checked codec when a field does not fit its width
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("Timestamp {value} does not fit the layout. Maximum allowed value is {max}")]
    TimestampOutOfRange { value: u64, max: u64 },
    #[error("Instance ID {value} does not fit the layout. Maximum allowed value is {max}")]
    InstanceOutOfRange { value: u64, max: u64 },
    #[error("Sequence {value} does not fit the layout. Maximum allowed value is {max}")]
    SequenceOutOfRange { value: u64, max: u64 },
}

/// Field widths and timestamp unit of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    unit: TimeUnit,
    instance_bits: u8,
    sequence_bits: u8,
}

impl Layout {
    /// Create a custom layout.
    ///
    /// Returns `None` when the instance and sequence fields leave no room for
    /// a timestamp bit.
    pub const fn new(unit: TimeUnit, instance_bits: u8, sequence_bits: u8) -> Option<Self> {
        if instance_bits as u16 + sequence_bits as u16 >= ID_BITS as u16 {
            return None;
        }
        Some(Self::from_parts(unit, instance_bits, sequence_bits))
    }

    const fn from_parts(unit: TimeUnit, instance_bits: u8, sequence_bits: u8) -> Self {
        Self {
            unit,
            instance_bits,
            sequence_bits,
        }
    }

    #[inline(always)]
    const fn mask(bits: u8) -> u64 {
        if bits >= 64 {
            u64::MAX
        } else {
            (1u64 << bits) - 1
        }
    }

    #[inline(always)]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    #[inline(always)]
    pub const fn instance_bits(&self) -> u8 {
        self.instance_bits
    }

    #[inline(always)]
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    #[inline(always)]
    pub const fn timestamp_bits(&self) -> u8 {
        ID_BITS - self.shift()
    }

    /// Bit offset of the timestamp field
    #[inline(always)]
    pub const fn shift(&self) -> u8 {
        self.instance_bits + self.sequence_bits
    }

    #[inline(always)]
    pub const fn max_instance(&self) -> u64 {
        Self::mask(self.instance_bits)
    }

    #[inline(always)]
    pub const fn max_sequence(&self) -> u64 {
        Self::mask(self.sequence_bits)
    }

    #[inline(always)]
    pub const fn max_timestamp(&self) -> u64 {
        Self::mask(self.timestamp_bits())
    }

    /// Last instant representable by this layout for the given epoch
    pub fn expires_at(&self, epoch: u64) -> Option<DateTime<Utc>> {
        self.unit
            .to_datetime(epoch.checked_add(self.max_timestamp())?)
    }

    /// Pack the three fields into one identifier, rejecting any value that
    /// does not fit its field.
    pub fn pack(&self, timestamp: u64, instance: u64, sequence: u64) -> Result<u64, EncodingError> {
        if timestamp > self.max_timestamp() {
            return Err(EncodingError::TimestampOutOfRange {
                value: timestamp,
                max: self.max_timestamp(),
            });
        }
        if instance > self.max_instance() {
            return Err(EncodingError::InstanceOutOfRange {
                value: instance,
                max: self.max_instance(),
            });
        }
        if sequence > self.max_sequence() {
            return Err(EncodingError::SequenceOutOfRange {
                value: sequence,
                max: self.max_sequence(),
            });
        }
        Ok(self.pack_unchecked(timestamp, instance, sequence))
    }

    /// Pack fields already known to be in range
    #[inline(always)]
    pub(crate) const fn pack_unchecked(&self, timestamp: u64, instance: u64, sequence: u64) -> u64 {
        (timestamp << self.shift()) | (instance << self.sequence_bits) | sequence
    }

    /// Split an identifier into `(timestamp, instance, sequence)`
    #[inline]
    pub const fn unpack(&self, id: u64) -> (u64, u64, u64) {
        let sequence = id & self.max_sequence();
        let instance = (id >> self.sequence_bits) & self.max_instance();
        let timestamp = (id >> self.shift()) & self.max_timestamp();
        (timestamp, instance, sequence)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Preset::SnowflakeMs.layout()
    }
}

/// Stateless decoding for any holder of the layout
#[inline]
pub fn decode(id: u64, layout: &Layout) -> (u64, u64, u64) {
    layout.unpack(id)
}
