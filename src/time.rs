//! Clock sources for identifier generation
//!
//! Readings are not trusted to be monotonic; the generator detects and
//! reports any regression itself.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::layout::TimeUnit;

/// January 1, 2024 UTC in milliseconds since the Unix epoch
pub const DEFAULT_EPOCH_MS: u64 = 1_704_067_200_000;

/// A source of wall-clock ticks.
///
/// Implementations return the current time as ticks of `unit` since the Unix
/// epoch. Mock sources used in tests may ignore `unit` and return scripted
/// values.
pub trait TimeSource {
    fn current_ticks(&self, unit: TimeUnit) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    #[inline(always)]
    fn current_ticks(&self, unit: TimeUnit) -> u64 {
        (**self).current_ticks(unit)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    #[inline(always)]
    fn current_ticks(&self, unit: TimeUnit) -> u64 {
        (**self).current_ticks(unit)
    }
}

/// Reads `SystemTime::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    #[inline(always)]
    fn current_ticks(&self, unit: TimeUnit) -> u64 {
        unix_time(unit)
    }
}

/// Current wall-clock time in `unit` since the Unix epoch.
///
/// A system clock set before 1970 reads as zero, which the generator then
/// reports as a reading before the epoch.
#[inline(always)]
pub fn unix_time(unit: TimeUnit) -> u64 {
    let since = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    match unit {
        TimeUnit::Millisecond => saturate(since.as_millis()),
        TimeUnit::Microsecond => saturate(since.as_micros()),
    }
}

/// Readings past `u64::MAX` stick at the maximum, which no layout can encode
#[inline(always)]
fn saturate(ticks: u128) -> u64 {
    u64::try_from(ticks).unwrap_or(u64::MAX)
}
