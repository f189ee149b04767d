//! Wait and backoff strategies for sequence exhaustion
//!
//! Spin first, then sleep with exponential backoff, never past the caller's
//! deadline.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::MicroflakeConfig;

/// First sleep after the spin phase gives up
pub const INITIAL_BACKOFF: Duration = Duration::from_micros(50);

/// Maximum single sleep between clock polls
pub const MAX_BACKOFF: Duration = Duration::from_millis(1);

/// Perform spin-wait loop, checking for tick advancement
///
/// Returns Some(new_tick) if the tick advanced, None if spin loops exhausted
#[inline]
pub fn spin_wait<F>(from_tick: u64, config: &MicroflakeConfig, get_time: F) -> Option<u64>
where
    F: Fn() -> u64,
{
    if !config.spin_enabled() || config.spin_loops() == 0 {
        return None;
    }

    let yield_every = config.spin_yield_every();

    for i in 0..config.spin_loops() {
        let new_tick = get_time();
        if new_tick > from_tick {
            return Some(new_tick);
        }

        std::hint::spin_loop();

        if yield_every != 0 && i % yield_every == yield_every - 1 {
            thread::yield_now();
        }
    }

    None
}

/// Sleep with exponential backoff until the tick advances or `deadline`
/// passes
#[inline]
pub fn sleep_until_next_tick<F>(from_tick: u64, deadline: Instant, get_time: F) -> Option<u64>
where
    F: Fn() -> u64,
{
    let mut backoff = INITIAL_BACKOFF;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return None;
        }
        thread::sleep(backoff.min(remaining));
        let new_tick = get_time();
        if new_tick > from_tick {
            return Some(new_tick);
        }
        backoff = next_backoff(backoff);
    }
}

/// Wait for the clock to move past `from_tick`, bounded by `deadline`
pub fn wait_for_next_tick<F>(
    from_tick: u64,
    config: &MicroflakeConfig,
    deadline: Instant,
    get_time: F,
) -> Option<u64>
where
    F: Fn() -> u64,
{
    if let Some(new_tick) = spin_wait(from_tick, config, &get_time) {
        return Some(new_tick);
    }
    sleep_until_next_tick(from_tick, deadline, get_time)
}

/// Calculate next backoff duration with exponential growth capped at MAX_BACKOFF
#[inline(always)]
pub fn next_backoff(current: Duration) -> Duration {
    current.saturating_mul(2).min(MAX_BACKOFF)
}
